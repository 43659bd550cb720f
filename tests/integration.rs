use image::{GrayImage, Luma, Rgb, RgbImage};
use logo_inpaint::{inpaint, remove_marked_region, InpaintAlgorithm, InpaintOptions};

/// 100x100 solid gray with a 20x20 white square mask at the center.
fn gray_scene() -> (RgbImage, GrayImage) {
    let img = RgbImage::from_pixel(100, 100, Rgb([128, 128, 128]));
    let mut mask = GrayImage::new(100, 100);
    for y in 40..60 {
        for x in 40..60 {
            mask.put_pixel(x, y, Luma([255]));
        }
    }
    (img, mask)
}

#[test]
fn center_square_is_synthesized_and_surroundings_preserved() {
    let (img, mask) = gray_scene();
    let result = inpaint(&img, &mask, &InpaintOptions::default()).unwrap();

    assert_eq!(result.dimensions(), (100, 100));
    for (x, y, px) in result.enumerate_pixels() {
        let masked = (40..60).contains(&x) && (40..60).contains(&y);
        if masked {
            // Synthesized from the gray surroundings, not left black.
            assert_ne!(px[0], 0, "masked pixel ({x},{y}) was not synthesized");
        } else {
            assert_eq!(px, img.get_pixel(x, y), "pixel ({x},{y}) was modified");
        }
    }
}

#[test]
fn diffusion_variant_honors_the_same_contract() {
    let (img, mask) = gray_scene();
    let options = InpaintOptions {
        algorithm: InpaintAlgorithm::Diffusion,
        ..InpaintOptions::default()
    };
    let result = inpaint(&img, &mask, &options).unwrap();

    for (x, y, px) in result.enumerate_pixels() {
        let masked = (40..60).contains(&x) && (40..60).contains(&y);
        if masked {
            assert_ne!(px[0], 0);
        } else {
            assert_eq!(px, img.get_pixel(x, y));
        }
    }
}

#[test]
fn all_zero_mask_returns_the_input_unchanged() {
    let mut img = RgbImage::new(64, 48);
    for (x, y, px) in img.enumerate_pixels_mut() {
        *px = Rgb([(x * 3 % 256) as u8, (y * 5 % 256) as u8, ((x + y) % 256) as u8]);
    }
    let mask = GrayImage::new(64, 48);

    let result = inpaint(&img, &mask, &InpaintOptions::default()).unwrap();
    assert_eq!(result.as_raw(), img.as_raw());
}

#[test]
fn mismatched_mask_is_rejected() {
    let img = RgbImage::new(100, 100);
    let mask = GrayImage::new(50, 50);
    assert!(inpaint(&img, &mask, &InpaintOptions::default()).is_err());
}

#[test]
fn png_round_trip_is_lossless() {
    let (img, mask) = gray_scene();
    let result = inpaint(&img, &mask, &InpaintOptions::default()).unwrap();

    let png = logo_inpaint::encode_png(&result).unwrap();
    let decoded = image::load_from_memory(&png).unwrap().to_rgb8();
    assert_eq!(decoded.as_raw(), result.as_raw());
}

#[test]
fn batch_runner_end_to_end() {
    let dir = tempfile::tempdir().unwrap();
    let image_path = dir.path().join("photo.png");
    let mask_path = dir.path().join("mask.png");
    let output_path = dir.path().join("cleaned.png");

    let (img, mask) = gray_scene();
    img.save(&image_path).unwrap();
    mask.save(&mask_path).unwrap();

    remove_marked_region(
        &image_path,
        &mask_path,
        &output_path,
        &InpaintOptions::default(),
    )
    .unwrap();

    assert!(output_path.exists());
    let out = image::open(&output_path).unwrap().to_rgb8();
    assert_eq!(out.dimensions(), img.dimensions());
}
