use super::DrawElementsType;
use crate::RendererError;

/// Smallest and largest index referenced by an index buffer range, restart indices excluded.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct IndexRange {
    pub start: u32,
    pub end: u32,
    /// Indices scanned, restart indices excluded.
    pub vertex_index_count: usize,
}

impl IndexRange {
    pub const fn new(start: u32, end: u32, vertex_index_count: usize) -> Self {
        Self {
            start,
            end,
            vertex_index_count,
        }
    }

    /// Scans the first `count` indices of type `index_type` in `indices` (native byte order).
    ///
    /// With no index left to scan the range is empty (`start == end == 0`).
    pub fn compute(
        index_type: DrawElementsType,
        indices: &[u8],
        count: usize,
        primitive_restart: bool,
    ) -> Self {
        let restart = index_type.restart_index();
        let bytes = index_type.bytes();
        let mut min = u32::MAX;
        let mut max = 0;
        let mut scanned = 0;

        for chunk in indices.chunks_exact(bytes).take(count) {
            let index = match index_type {
                DrawElementsType::UnsignedByte => u32::from(chunk[0]),
                DrawElementsType::UnsignedShort => {
                    u32::from(u16::from_ne_bytes([chunk[0], chunk[1]]))
                }
                DrawElementsType::UnsignedInt => {
                    u32::from_ne_bytes([chunk[0], chunk[1], chunk[2], chunk[3]])
                }
            };
            if primitive_restart && index == restart {
                continue;
            }
            min = min.min(index);
            max = max.max(index);
            scanned += 1;
        }

        if scanned == 0 {
            return Self::default();
        }
        Self::new(min, max, scanned)
    }

    /// Vertices spanned by the range, both ends included.
    pub const fn vertex_count(&self) -> usize {
        (self.end - self.start) as usize + 1
    }
}

/// First vertex fetched by an indexed draw: `base_vertex + index_range.start`.
///
/// A negative result or one beyond `i32::MAX` is reported as overflow.
pub fn compute_start_vertex(
    index_range: &IndexRange,
    base_vertex: i32,
) -> Result<i32, RendererError> {
    let start = i64::from(base_vertex) + i64::from(index_range.start);
    if start < 0 {
        return Err(RendererError::IntegerOverflow("negative start vertex"));
    }
    i32::try_from(start).map_err(|_| RendererError::IntegerOverflow("start vertex"))
}

/// `(start_vertex, vertex_count)` of a draw.
///
/// Non-indexed draws (`index_type == None`) pass `first_vertex` and the count through;
/// indexed draws scan `indices` for the range they reference.
pub fn get_vertex_range_info(
    first_vertex: i32,
    vertex_or_index_count: usize,
    index_type: Option<DrawElementsType>,
    indices: &[u8],
    primitive_restart: bool,
    base_vertex: i32,
) -> Result<(i32, usize), RendererError> {
    let Some(index_type) = index_type else {
        return Ok((first_vertex, vertex_or_index_count));
    };
    let range = IndexRange::compute(index_type, indices, vertex_or_index_count, primitive_restart);
    let start = compute_start_vertex(&range, base_vertex)?;
    Ok((start, range.vertex_count()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn u16_indices(values: &[u16]) -> Vec<u8> {
        values.iter().flat_map(|v| v.to_ne_bytes()).collect()
    }

    #[test]
    fn restart_indices_are_ignored_when_enabled() {
        let indices = u16_indices(&[5, 0xFFFF, 2, 9]);
        assert_eq!(
            IndexRange::compute(DrawElementsType::UnsignedShort, &indices, 4, true),
            IndexRange::new(2, 9, 3)
        );
        assert_eq!(
            IndexRange::compute(DrawElementsType::UnsignedShort, &indices, 4, false),
            IndexRange::new(2, 0xFFFF, 4)
        );
    }

    #[test]
    fn count_limits_the_scan() {
        let indices = [4u8, 7, 1];
        let range = IndexRange::compute(DrawElementsType::UnsignedByte, &indices, 2, false);
        assert_eq!(range, IndexRange::new(4, 7, 2));
        assert_eq!(range.vertex_count(), 4);
    }

    #[test]
    fn start_vertex_bounds() {
        let range = IndexRange::new(10, 20, 2);
        assert_eq!(compute_start_vertex(&range, -4).unwrap(), 6);
        assert!(compute_start_vertex(&range, -11).is_err());

        let high = IndexRange::new(u32::MAX, u32::MAX, 1);
        assert_eq!(
            compute_start_vertex(&high, 0).unwrap_err(),
            RendererError::IntegerOverflow("start vertex")
        );
        assert_eq!(compute_start_vertex(&high, i32::MIN).unwrap(), i32::MAX);
    }

    #[test]
    fn vertex_range_info_for_both_draw_kinds() {
        assert_eq!(get_vertex_range_info(3, 12, None, &[], false, 0).unwrap(), (3, 12));

        let indices: Vec<u8> = [8u32, 3, 5].iter().flat_map(|v| v.to_ne_bytes()).collect();
        let index_type = Some(DrawElementsType::UnsignedInt);
        assert_eq!(
            get_vertex_range_info(0, 3, index_type, &indices, false, 2).unwrap(),
            (5, 6)
        );
    }
}
