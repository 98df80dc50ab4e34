use pixelfmt::{
    byteorder::{BigEndian, LittleEndian},
    color::{rgb565_to_rgb888, rgb888_to_grayscale, rgb888_to_rgb565, rgb888_word_to_rgb565, Rgb888},
    hex::{concat_digits, hex_digit},
    netpbm::{build_header, locate_data_start, Magic, MAX_PIXEL_VALUE},
    pipeline::{convert, ConvertError, DimensionsSource, Outcome},
    plan::{resolve, Plan, PlanError},
    Dimensions, FormatKind,
};

/// A source for plans that must never need dimensions.
struct NoDimensions;

impl DimensionsSource for NoDimensions {
    fn dimensions(&mut self) -> Option<Dimensions> {
        None
    }
}

fn channel_values() -> impl Iterator<Item = u8> + Clone {
    (0..=255).step_by(5).chain([255])
}

#[test]
fn rgb565_round_trip_stays_within_quantization_error() {
    for r in channel_values() {
        for g in channel_values() {
            for b in channel_values() {
                let pixel = Rgb888::new(r, g, b);
                let back = rgb565_to_rgb888(rgb888_to_rgb565(pixel));

                // 3 truncated bits on red/blue, 2 on green.
                assert!(back.r.abs_diff(r) <= 7, "red {r} -> {}", back.r);
                assert!(back.g.abs_diff(g) <= 3, "green {g} -> {}", back.g);
                assert!(back.b.abs_diff(b) <= 7, "blue {b} -> {}", back.b);
            }
        }
    }
}

#[test]
fn rgb888_to_rgb565_packs_channels_into_their_fields() {
    assert_eq!(rgb888_to_rgb565(Rgb888::new(255, 0, 0)), 0xF800);
    assert_eq!(rgb888_to_rgb565(Rgb888::new(0, 255, 0)), 0x07E0);
    assert_eq!(rgb888_to_rgb565(Rgb888::new(0, 0, 255)), 0x001F);
    assert_eq!(rgb888_to_rgb565(Rgb888::new(255, 255, 255)), 0xFFFF);
    assert_eq!(rgb888_to_rgb565(Rgb888::new(0, 0, 0)), 0x0000);

    // Truncation, not rounding: the dropped low bits never spill over.
    assert_eq!(rgb888_to_rgb565(Rgb888::new(7, 3, 7)), 0x0000);

    let pixel = Rgb888::new(0x12, 0x34, 0x56);
    assert_eq!(rgb888_to_rgb565(pixel), rgb888_to_rgb565(pixel));
}

#[test]
fn rgb565_to_rgb888_rescales_endpoints_exactly() {
    assert_eq!(rgb565_to_rgb888(0x0000), Rgb888::new(0, 0, 0));
    assert_eq!(rgb565_to_rgb888(0xFFFF), Rgb888::new(255, 255, 255));

    // One quantization step up from zero per channel.
    assert_eq!(rgb565_to_rgb888(0x0800).r, 8);
    assert_eq!(rgb565_to_rgb888(0x0020).g, 4);
    assert_eq!(rgb565_to_rgb888(0x0001).b, 8);
}

#[test]
fn rgb888_word_matches_per_channel_conversion() {
    for word in [0x00FF_0000, 0x0000_FF00, 0x0000_00FF, 0x0012_3456] {
        let split = Rgb888::new((word >> 16) as u8, (word >> 8) as u8, word as u8);
        assert_eq!(rgb888_word_to_rgb565(word), rgb888_to_rgb565(split));
    }
}

#[test]
fn grayscale_is_luminosity_weighted_and_in_range() {
    assert_eq!(rgb888_to_grayscale(Rgb888::new(0, 0, 0)), 0);
    assert_eq!(rgb888_to_grayscale(Rgb888::new(255, 255, 255)), 255);
    // 0.3 * 255 = 76.5, rounded half-away
    assert_eq!(rgb888_to_grayscale(Rgb888::new(255, 0, 0)), 77);
    assert_eq!(rgb888_to_grayscale(Rgb888::new(0, 255, 0)), 150);
    assert_eq!(rgb888_to_grayscale(Rgb888::new(0, 0, 255)), 28);

    for r in channel_values() {
        for g in channel_values() {
            let gray = rgb888_to_grayscale(Rgb888::new(r, g, 255));
            assert!(gray as u16 <= 255);
        }
    }
}

#[test]
fn header_bytes_are_exact() {
    let header = build_header(
        Magic::Ppm,
        255,
        Dimensions {
            width: 640,
            height: 480,
        },
    );
    assert_eq!(header, b"P6\n640 480\n255\n");

    let header = build_header(
        Magic::Pgm,
        15,
        Dimensions {
            width: 1,
            height: 1,
        },
    );
    assert_eq!(header, b"P5\n1 1\n15\n");
}

#[test]
fn header_round_trip_recovers_payload() {
    let payload = [0x01, 0x02, 0x03, 0xFF, 0xFE, 0xFD];
    let header = build_header(
        Magic::Ppm,
        MAX_PIXEL_VALUE,
        Dimensions {
            width: 2,
            height: 1,
        },
    );

    let mut file = header.clone();
    file.extend_from_slice(&payload);

    let start = locate_data_start(&file, MAX_PIXEL_VALUE).unwrap();
    assert_eq!(start, header.len());
    assert_eq!(&file[start..], payload);
}

#[test]
fn missing_header_terminator_is_reported() {
    assert!(locate_data_start(b"P6\n2 1\n", MAX_PIXEL_VALUE).is_err());
    assert!(locate_data_start(&[], MAX_PIXEL_VALUE).is_err());
}

#[test]
fn identity_pairs_resolve_to_identity() {
    for kind in [
        FormatKind::Rgb565,
        FormatKind::Rgb888,
        FormatKind::Grayscale,
        FormatKind::Ppm,
    ] {
        assert_eq!(resolve(kind, kind).unwrap(), Plan::Identity);
    }

    let outcome = convert::<LittleEndian>(
        &[1, 2, 3],
        FormatKind::Rgb888,
        FormatKind::Rgb888,
        &mut NoDimensions,
    )
    .unwrap();
    assert_eq!(outcome, Outcome::Identity);
}

#[test]
fn pbm_input_is_unsupported() {
    assert!(matches!(
        resolve(FormatKind::Pbm, FormatKind::Rgb888),
        Err(PlanError::UnsupportedConversion { .. })
    ));

    let err = convert::<LittleEndian>(
        &[0xAA],
        FormatKind::Pbm,
        FormatKind::Rgb888,
        &mut NoDimensions,
    )
    .unwrap_err();
    assert!(matches!(err, ConvertError::Plan { .. }));
}

#[test]
fn pbm_output_is_unsupported() {
    assert!(matches!(
        resolve(FormatKind::Rgb888, FormatKind::Pbm),
        Err(PlanError::UnsupportedConversion { .. })
    ));
}

#[test]
fn rgb888_to_rgb565_buffer_little_endian() {
    // Two pixels: pure red, pure green.
    let input = [255, 0, 0, 0, 255, 0];
    let outcome = convert::<LittleEndian>(
        &input,
        FormatKind::Rgb888,
        FormatKind::Rgb565,
        &mut NoDimensions,
    )
    .unwrap();
    assert_eq!(outcome, Outcome::Converted(vec![0x00, 0xF8, 0xE0, 0x07]));
}

#[test]
fn rgb888_to_rgb565_buffer_big_endian() {
    let input = [255, 0, 0];
    let outcome = convert::<BigEndian>(
        &input,
        FormatKind::Rgb888,
        FormatKind::Rgb565,
        &mut NoDimensions,
    )
    .unwrap();
    assert_eq!(outcome, Outcome::Converted(vec![0xF8, 0x00]));
}

#[test]
fn rgb565_to_grayscale_buffer() {
    // 0xFFFF -> white -> 255, 0x0000 -> black -> 0.
    let input = [0xFF, 0xFF, 0x00, 0x00];
    let outcome = convert::<LittleEndian>(
        &input,
        FormatKind::Rgb565,
        FormatKind::Grayscale,
        &mut NoDimensions,
    )
    .unwrap();
    assert_eq!(outcome, Outcome::Converted(vec![255, 0]));
}

#[test]
fn rgb565_to_rgb888_buffer() {
    let input = [0xFF, 0xFF];
    let outcome = convert::<LittleEndian>(
        &input,
        FormatKind::Rgb565,
        FormatKind::Rgb888,
        &mut NoDimensions,
    )
    .unwrap();
    assert_eq!(outcome, Outcome::Converted(vec![255, 255, 255]));
}

#[test]
fn rgb888_to_ppm_prepends_header_and_copies_pixels() {
    let input = [10, 20, 30, 40, 50, 60];
    let mut dims = Dimensions {
        width: 2,
        height: 1,
    };
    let outcome =
        convert::<LittleEndian>(&input, FormatKind::Rgb888, FormatKind::Ppm, &mut dims).unwrap();

    let mut expected = b"P6\n2 1\n255\n".to_vec();
    expected.extend_from_slice(&input);
    assert_eq!(outcome, Outcome::Converted(expected));
}

#[test]
fn rgb565_to_pgm_wraps_grayscale_output() {
    let input = [0xFF, 0xFF, 0x00, 0x00];
    let mut dims = Dimensions {
        width: 2,
        height: 1,
    };
    let outcome =
        convert::<LittleEndian>(&input, FormatKind::Rgb565, FormatKind::Pgm, &mut dims).unwrap();

    let mut expected = b"P5\n2 1\n255\n".to_vec();
    expected.extend_from_slice(&[255, 0]);
    assert_eq!(outcome, Outcome::Converted(expected));
}

#[test]
fn ppm_to_rgb888_strips_header_verbatim() {
    let pixels = [9, 8, 7, 6, 5, 4];
    let mut file = b"P6\n2 1\n255\n".to_vec();
    file.extend_from_slice(&pixels);

    let outcome = convert::<LittleEndian>(
        &file,
        FormatKind::Ppm,
        FormatKind::Rgb888,
        &mut NoDimensions,
    )
    .unwrap();
    assert_eq!(outcome, Outcome::Converted(pixels.to_vec()));
}

#[test]
fn ppm_to_rgb565_strips_then_downsamples() {
    let mut file = b"P6\n1 1\n255\n".to_vec();
    file.extend_from_slice(&[255, 0, 0]);

    let outcome = convert::<LittleEndian>(
        &file,
        FormatKind::Ppm,
        FormatKind::Rgb565,
        &mut NoDimensions,
    )
    .unwrap();
    assert_eq!(outcome, Outcome::Converted(vec![0x00, 0xF8]));
}

#[test]
fn ppm_without_header_terminator_fails() {
    let err = convert::<LittleEndian>(
        b"P6 corrupted",
        FormatKind::Ppm,
        FormatKind::Rgb888,
        &mut NoDimensions,
    )
    .unwrap_err();
    assert!(matches!(err, ConvertError::Header { .. }));
}

#[test]
fn partial_pixel_groups_are_rejected() {
    let err = convert::<LittleEndian>(
        &[1, 2, 3, 4],
        FormatKind::Rgb888,
        FormatKind::Rgb565,
        &mut NoDimensions,
    )
    .unwrap_err();
    assert!(matches!(err, ConvertError::TruncatedInput { .. }));
}

#[test]
fn wrapping_without_dimensions_fails() {
    let err = convert::<LittleEndian>(
        &[1, 2, 3],
        FormatKind::Rgb888,
        FormatKind::Ppm,
        &mut NoDimensions,
    )
    .unwrap_err();
    assert!(matches!(err, ConvertError::MissingDimensions));
}

#[test]
fn hex_digits_parse_and_tolerate_garbage() {
    assert_eq!(hex_digit(b'0').unwrap(), 0);
    assert_eq!(hex_digit(b'9').unwrap(), 9);
    assert_eq!(hex_digit(b'a').unwrap(), 10);
    assert_eq!(hex_digit(b'F').unwrap(), 15);
    assert!(hex_digit(b'g').is_err());

    assert_eq!(concat_digits(b"f800"), 0xF800);
    assert_eq!(concat_digits(b"07e0"), 0x07E0);
    // Invalid digits contribute zero instead of failing the group.
    assert_eq!(concat_digits(b"fz00"), 0xF000);
}
