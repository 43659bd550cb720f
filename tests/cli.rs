#![cfg(feature = "cli")]

//! CLI behavior tests: argument rejection and the file-to-file happy path.

use assert_cmd::Command;
use image::{GrayImage, Luma, Rgb, RgbImage};
use predicates::prelude::*;

fn cmd() -> Command {
    Command::cargo_bin("logo-inpaint").unwrap()
}

#[test]
fn missing_arguments_exit_with_usage_error() {
    cmd()
        .assert()
        .failure()
        .stderr(predicate::str::contains("Usage"));
}

#[test]
fn zero_radius_is_rejected() {
    cmd()
        .args(["a.png", "b.png", "c.png", "--radius", "0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Radius must be at least 1"));
}

#[test]
fn unknown_algorithm_is_rejected() {
    cmd()
        .args(["a.png", "b.png", "c.png", "--algorithm", "magic"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid value"));
}

#[test]
fn missing_image_file_names_the_image_input() {
    let dir = tempfile::tempdir().unwrap();
    let mask_path = dir.path().join("mask.png");
    GrayImage::new(10, 10).save(&mask_path).unwrap();

    cmd()
        .arg(dir.path().join("absent.png"))
        .arg(&mask_path)
        .arg(dir.path().join("out.png"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to load image"));
}

#[test]
fn missing_mask_file_names_the_mask_input() {
    let dir = tempfile::tempdir().unwrap();
    let image_path = dir.path().join("photo.png");
    RgbImage::new(10, 10).save(&image_path).unwrap();

    cmd()
        .arg(&image_path)
        .arg(dir.path().join("absent.png"))
        .arg(dir.path().join("out.png"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to load mask"));
}

#[test]
fn valid_inputs_produce_an_output_file() {
    let dir = tempfile::tempdir().unwrap();
    let image_path = dir.path().join("photo.png");
    let mask_path = dir.path().join("mask.png");
    let output_path = dir.path().join("cleaned.png");

    RgbImage::from_pixel(60, 60, Rgb([200, 180, 160]))
        .save(&image_path)
        .unwrap();
    let mut mask = GrayImage::new(60, 60);
    for y in 25..35 {
        for x in 25..35 {
            mask.put_pixel(x, y, Luma([255]));
        }
    }
    mask.save(&mask_path).unwrap();

    cmd()
        .arg(&image_path)
        .arg(&mask_path)
        .arg(&output_path)
        .assert()
        .success()
        .stderr(predicate::str::contains("[OK]"));

    let out = image::open(&output_path).unwrap().to_rgb8();
    assert_eq!(out.dimensions(), (60, 60));
}

#[test]
fn debug_dir_writes_a_composite() {
    let dir = tempfile::tempdir().unwrap();
    let image_path = dir.path().join("photo.png");
    let mask_path = dir.path().join("mask.png");
    let output_path = dir.path().join("cleaned.png");
    let debug_dir = dir.path().join("debug");

    RgbImage::from_pixel(30, 30, Rgb([90, 90, 90]))
        .save(&image_path)
        .unwrap();
    GrayImage::new(30, 30).save(&mask_path).unwrap();

    cmd()
        .arg(&image_path)
        .arg(&mask_path)
        .arg(&output_path)
        .arg("--debug-dir")
        .arg(&debug_dir)
        .assert()
        .success();

    assert!(debug_dir.join("before_after.png").exists());
}
