use pretty_assertions::assert_eq;
use prism_format::{convert_to_linear, convert_to_srgb, Format, PixelFormatId};
use prism_renderer::{get_pack_pixels_params, pack_pixels, PixelPackState, Rectangle};

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::TRACE)
        .with_test_writer()
        .try_init();
}

#[test]
fn clipped_flipped_readback_lands_after_skip_bytes() {
    init_tracing();

    // 4x4 client buffer; only the 2x2 block at (1, 2) is readable.
    let area = Rectangle::new(0, 0, 4, 4);
    let clipped = Rectangle::new(1, 2, 2, 2);
    let pack_state = PixelPackState { reverse_row_order: true };
    let format = PixelFormatId::R8G8B8A8Unorm;
    let (mut params, skip_bytes) =
        get_pack_pixels_params(format, 16, &pack_state, &area, &clipped, 0).unwrap();
    assert_eq!(skip_bytes, 4 + 2 * 16);
    params.offset = skip_bytes as usize;

    let source: Vec<u8> = (1..=16).collect();
    let mut dest = vec![0u8; 64];
    pack_pixels(&params, PixelFormatId::R8G8B8A8Unorm, 8, &source, &mut dest);

    // Bottom-up source: its second row is the first row written.
    assert_eq!(&dest[36..44], &source[8..16]);
    assert_eq!(&dest[52..60], &source[0..8]);
    assert!(dest[..36].iter().all(|&b| b == 0));
    assert!(dest[44..52].iter().all(|&b| b == 0));
}

#[test]
fn readback_into_float_destination_uses_generic_conversion() {
    init_tracing();

    let area = Rectangle::new(0, 0, 2, 1);
    let pack_state = PixelPackState::default();
    let format = PixelFormatId::R32G32B32A32Float;
    let (params, _) = get_pack_pixels_params(format, 32, &pack_state, &area, &area, 0).unwrap();

    let source = [255u8, 0, 0, 255, 0, 255, 0, 0];
    let mut dest = vec![0u8; 32];
    pack_pixels(&params, PixelFormatId::R8G8B8A8Unorm, 8, &source, &mut dest);

    let floats: Vec<f32> = dest
        .chunks_exact(4)
        .map(|c| f32::from_le_bytes([c[0], c[1], c[2], c[3]]))
        .collect();
    assert_eq!(floats, vec![1.0, 0.0, 0.0, 1.0, 0.0, 1.0, 0.0, 0.0]);
}

#[test]
fn srgb_readback_swizzles_without_changing_encoding() {
    init_tracing();

    let srgb = convert_to_srgb(PixelFormatId::R8G8B8A8Unorm);
    assert_eq!(srgb, PixelFormatId::R8G8B8A8UnormSrgb);
    assert_eq!(convert_to_linear(srgb), PixelFormatId::R8G8B8A8Unorm);
    assert_eq!(Format::get(srgb).pixel_bytes, 4);

    let area = Rectangle::new(0, 0, 1, 1);
    let (params, _) = get_pack_pixels_params(
        PixelFormatId::B8G8R8A8UnormSrgb,
        4,
        &PixelPackState::default(),
        &area,
        &area,
        0,
    )
    .unwrap();
    let mut dest = [0u8; 4];
    pack_pixels(&params, srgb, 4, &[10, 20, 30, 40], &mut dest);
    assert_eq!(dest, [30, 20, 10, 40]);
}
