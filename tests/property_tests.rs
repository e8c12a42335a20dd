use image::{DynamicImage, GenericImageView};
use img_prep::compress::{resize_to, CompressOptions};
use img_prep::outcome::Outcome;
use img_prep::select::is_image_file;
use proptest::prelude::*;
use std::path::{Path, PathBuf};

proptest! {
    #[test]
    fn compress_options_quality_in_range(quality in 1u8..=100u8) {
        let options = CompressOptions::new(Some(quality), None, None, false);
        prop_assert!(options.is_ok());
    }

    #[test]
    fn compress_options_quality_out_of_range(quality in 0u8..=255u8) {
        let result = CompressOptions::new(Some(quality), None, None, false);
        if quality == 0 || quality > 100 {
            prop_assert!(result.is_err());
        } else {
            prop_assert!(result.is_ok());
        }
    }

    #[test]
    fn compress_options_resize_needs_both_dimensions(
        width in prop::option::of(1u32..=4000u32),
        height in prop::option::of(1u32..=4000u32)
    ) {
        let result = CompressOptions::new(Some(80), width, height, false);
        match (width, height) {
            (Some(w), Some(h)) => {
                prop_assert_eq!(result.unwrap().resize, Some((w, h)));
            }
            (None, None) => {
                prop_assert_eq!(result.unwrap().resize, None);
            }
            _ => prop_assert!(result.is_err()),
        }
    }

    #[test]
    fn resize_always_yields_exact_dimensions(
        width in 1u32..=64u32,
        height in 1u32..=64u32,
        target_w in 1u32..=64u32,
        target_h in 1u32..=64u32
    ) {
        let mut img = DynamicImage::new_rgb8(width, height);
        resize_to(&mut img, target_w, target_h);
        prop_assert_eq!(img.dimensions(), (target_w, target_h));
    }

    #[test]
    fn is_image_file_matches_allow_list(
        stem in "[a-zA-Z0-9_-]{1,12}",
        extension in prop::sample::select(
            &["jpg", "jpeg", "png", "gif", "bmp", "webp", "JPG", "PNG", "tiff", "avif", "txt", "pdf"]
        )
    ) {
        let path = PathBuf::from(format!("{stem}.{extension}"));
        let expected = matches!(
            extension.to_lowercase().as_str(),
            "jpg" | "jpeg" | "png" | "gif" | "bmp" | "webp"
        );
        prop_assert_eq!(is_image_file(&path), expected);
    }

    #[test]
    fn extensionless_paths_are_never_images(stem in "[a-zA-Z0-9_-]{1,12}") {
        prop_assert!(!is_image_file(Path::new(&stem)));
    }

    #[test]
    fn reduction_percent_matches_formula(
        original_size in 1u64..=1_000_000_000u64,
        new_size in 0u64..=1_000_000_000u64
    ) {
        let outcome = Outcome {
            path: PathBuf::from("f.jpg"),
            original_size,
            new_size,
        };
        let expected = (1.0 - new_size as f64 / original_size as f64) * 100.0;
        prop_assert_eq!(outcome.reduction_percent(), expected);
        // Growth reports negative, shrink reports positive.
        if new_size > original_size {
            prop_assert!(outcome.reduction_percent() < 0.0);
        } else if new_size < original_size {
            prop_assert!(outcome.reduction_percent() > 0.0);
        }
    }
}
