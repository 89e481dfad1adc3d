/// Standard sample positions (D3D11 / Vulkan), flattened `x, y` pairs, indexed by
/// `log2(sample_count)`.
static SAMPLE_POSITIONS: [&[f32]; 5] = [
    &[0.5, 0.5],
    &[0.75, 0.75, 0.25, 0.25],
    &[0.375, 0.125, 0.875, 0.375, 0.125, 0.625, 0.625, 0.875],
    &[
        0.5625, 0.3125, 0.4375, 0.6875, 0.8125, 0.5625, 0.3125, 0.1875, //
        0.1875, 0.8125, 0.0625, 0.4375, 0.6875, 0.9375, 0.9375, 0.0625,
    ],
    &[
        0.5625, 0.5625, 0.4375, 0.3125, 0.3125, 0.625, 0.75, 0.4375, //
        0.1875, 0.375, 0.625, 0.8125, 0.8125, 0.6875, 0.6875, 0.1875, //
        0.375, 0.875, 0.5, 0.0625, 0.25, 0.125, 0.125, 0.75, //
        0.0, 0.5, 0.9375, 0.25, 0.875, 0.9375, 0.0625, 0.0,
    ],
];

/// Position of sample `index` inside a pixel for a power-of-two `sample_count`.
///
/// Counts above 16 have no standard layout and report the pixel center.
pub fn get_sample_position(sample_count: u32, index: usize) -> [f32; 2] {
    debug_assert!(
        sample_count.is_power_of_two(),
        "sample count {sample_count} is not a power of two"
    );
    if sample_count > 16 {
        return [0.5, 0.5];
    }
    let positions = SAMPLE_POSITIONS[sample_count.trailing_zeros() as usize];
    debug_assert!(
        2 * index + 1 < positions.len(),
        "sample {index} out of range for {sample_count}x"
    );
    [positions[2 * index], positions[2 * index + 1]]
}
