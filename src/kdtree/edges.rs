/// Whether a [`BoundEdge`] marks where a primitive's extent begins or ends along
/// the axis being swept.
///
/// `End` is declared before `Start` so that the derived [`Ord`] sorts edges at
/// equal positions with `End` first, matching the tie-break the SAH sweep needs:
/// closing out a primitive before opening the next keeps `n_below`/`n_above`
/// correct at the shared position.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub(crate) enum EdgeKind {
    End,
    Start,
}

/// A construction-time event: where, along one axis, a primitive's bounding
/// interval begins or ends.
#[derive(Copy, Clone, Debug)]
pub(crate) struct BoundEdge {
    pub(crate) t: f32,
    pub(crate) prim_index: u32,
    pub(crate) kind: EdgeKind,
}

impl BoundEdge {
    pub(crate) fn start(t: f32, prim_index: u32) -> Self {
        BoundEdge {
            t,
            prim_index,
            kind: EdgeKind::Start,
        }
    }

    pub(crate) fn end(t: f32, prim_index: u32) -> Self {
        BoundEdge {
            t,
            prim_index,
            kind: EdgeKind::End,
        }
    }
}

/// Orders edges by position, with `End` before `Start` at equal positions.
pub(crate) fn cmp_edges(a: &BoundEdge, b: &BoundEdge) -> std::cmp::Ordering {
    a.t.partial_cmp(&b.t)
        .unwrap_or(std::cmp::Ordering::Equal)
        .then(a.kind.cmp(&b.kind))
}
