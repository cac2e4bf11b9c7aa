//! Integration tests for hue-rs crates.
//!
//! This crate contains end-to-end tests that run the color pipeline
//! across crate boundaries: decode, extract, convert, cluster, report and
//! parse the reports back.

#[cfg(test)]
mod golden;

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;
    use std::path::Path;

    use hue_cluster::{Dbscan, NOISE, cluster_samples};
    use hue_color::{LabConverter, lab_of};
    use hue_core::{ClusterRepresentative, ColorSample, LabPoint, Rgb8, total_count};
    use hue_io::{
        ClusteredSample, LabSample, TableFormat, extract_image_colors, read_samples, read_table,
        write_table,
    };
    use image::{Rgb, RgbImage};
    use tempfile::tempdir;

    /// Two tight color families plus one outlier.
    fn palette_image() -> RgbImage {
        let mut img = RgbImage::new(8, 8);
        for (x, y, px) in img.enumerate_pixels_mut() {
            *px = if y < 4 {
                Rgb([200 + (x % 2) as u8, 30, 30])
            } else {
                Rgb([20, 60 + (x % 3) as u8, 180])
            };
        }
        img.put_pixel(7, 7, Rgb([250, 250, 20]));
        img
    }

    /// Runs convert and cluster stages through files in `dir`.
    fn staged_pipeline(dir: &Path, format: TableFormat) -> (Vec<ClusteredSample>, Vec<ClusterRepresentative>) {
        let ext = format.extension();
        let image = dir.join("in.png");
        palette_image().save(&image).unwrap();

        let samples = extract_image_colors(&image).unwrap();
        let counts_path = dir.join(format!("color_data.{ext}"));
        write_table(&counts_path, &samples, None).unwrap();

        let samples: Vec<ColorSample> = read_samples(&counts_path, None).unwrap();
        let labs = LabConverter::new().convert_samples(&samples);
        let lab_rows: Vec<LabSample> = samples
            .iter()
            .zip(&labs)
            .map(|(&s, &l)| LabSample::new(s, l))
            .collect();
        let lab_path = dir.join(format!("color_data_lab.{ext}"));
        write_table(&lab_path, &lab_rows, None).unwrap();

        let lab_rows: Vec<LabSample> = read_samples(&lab_path, None).unwrap();
        let samples: Vec<ColorSample> = lab_rows.iter().map(LabSample::sample).collect();
        let labs: Vec<LabPoint> = lab_rows.iter().map(|r| r.lab).collect();
        let report = cluster_samples(&samples, &labs, &Dbscan::default(), false).unwrap();

        let clustered: Vec<ClusteredSample> = lab_rows
            .iter()
            .zip(report.assignment.labels())
            .map(|(&r, &l)| ClusteredSample::new(r, l))
            .collect();
        let clustered_path = dir.join(format!("clustered_lab_data.{ext}"));
        let groups_path = dir.join(format!("group_colors.{ext}"));
        write_table(&clustered_path, &clustered, None).unwrap();
        write_table(&groups_path, &report.representatives, None).unwrap();

        (
            read_table(&clustered_path, None).unwrap(),
            read_table(&groups_path, None).unwrap(),
        )
    }

    fn partition_of(rows: &[ClusteredSample]) -> BTreeSet<BTreeSet<Rgb8>> {
        let labels: BTreeSet<_> = rows.iter().map(|r| r.label).filter(|&l| l != NOISE).collect();
        labels
            .into_iter()
            .map(|l| rows.iter().filter(|r| r.label == l).map(|r| r.rgb).collect())
            .collect()
    }

    #[test]
    fn test_pipeline_text() {
        let dir = tempdir().unwrap();
        let (clustered, groups) = staged_pipeline(dir.path(), TableFormat::Text);

        // 2 reds + 3 blues + 1 yellow
        assert_eq!(clustered.len(), 6);
        assert_eq!(groups.len(), 2);
        let partition = partition_of(&clustered);
        assert_eq!(partition.len(), 2);

        let yellow = clustered.iter().find(|r| r.rgb == Rgb8::new(250, 250, 20)).unwrap();
        assert_eq!(yellow.label, NOISE);

        let pixels: u64 = groups.iter().map(|g| g.total_count).sum();
        assert_eq!(pixels, 63);
        let reps: BTreeSet<Rgb8> = groups.iter().map(|g| g.sample.rgb).collect();
        assert!(reps.contains(&Rgb8::new(200, 30, 30)));
        assert!(reps.contains(&Rgb8::new(20, 60, 180)));
    }

    #[test]
    fn test_text_and_json_agree() {
        let text_dir = tempdir().unwrap();
        let json_dir = tempdir().unwrap();
        let (text_rows, text_groups) = staged_pipeline(text_dir.path(), TableFormat::Text);
        let (json_rows, json_groups) = staged_pipeline(json_dir.path(), TableFormat::Json);

        assert_eq!(partition_of(&text_rows), partition_of(&json_rows));
        let reps = |g: &[ClusterRepresentative]| -> BTreeSet<Rgb8> {
            g.iter().map(|g| g.sample.rgb).collect()
        };
        assert_eq!(reps(&text_groups[..]), reps(&json_groups[..]));
    }

    #[test]
    fn test_counts_sum_to_pixels() {
        let dir = tempdir().unwrap();
        for (w, h) in [(1, 1), (7, 3), (64, 33)] {
            let img = RgbImage::from_fn(w, h, |x, y| Rgb([(x * 37 % 256) as u8, (y * 11 % 256) as u8, ((x ^ y) % 4) as u8]));
            let path = dir.path().join(format!("{w}x{h}.png"));
            img.save(&path).unwrap();
            let samples = extract_image_colors(&path).unwrap();
            assert_eq!(total_count(&samples), (w * h) as u64);
            assert!(samples.windows(2).all(|p| p[0].rgb < p[1].rgb));
        }
    }

    #[test]
    fn test_extraction_ignores_pixel_order() {
        let dir = tempdir().unwrap();
        let img = palette_image();
        let flipped = image::imageops::flip_horizontal(&image::imageops::rotate90(&img));
        img.save(dir.path().join("a.png")).unwrap();
        flipped.save(dir.path().join("b.png")).unwrap();
        assert_eq!(
            extract_image_colors(dir.path().join("a.png")).unwrap(),
            extract_image_colors(dir.path().join("b.png")).unwrap()
        );
    }

    #[test]
    fn test_two_by_two_scenario() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("2x2.bmp");
        let mut img = RgbImage::new(2, 2);
        img.put_pixel(0, 0, Rgb([255, 0, 0]));
        img.put_pixel(1, 0, Rgb([255, 0, 0]));
        img.put_pixel(0, 1, Rgb([0, 255, 0]));
        img.put_pixel(1, 1, Rgb([0, 0, 255]));
        img.save(&path).unwrap();

        let samples = extract_image_colors(&path).unwrap();
        assert_eq!(
            samples,
            vec![
                ColorSample::new(Rgb8::new(0, 0, 255), 1),
                ColorSample::new(Rgb8::new(0, 255, 0), 1),
                ColorSample::new(Rgb8::new(255, 0, 0), 2),
            ]
        );
    }

    #[test]
    fn test_lab_endpoints_and_determinism() {
        let black = lab_of(Rgb8::BLACK);
        let white = lab_of(Rgb8::WHITE);
        assert!(black.l.abs() < 0.1);
        assert!((white.l - 100.0).abs() < 0.1);
        assert!(white.a.abs() < 0.1 && white.b.abs() < 0.1);

        let conv = LabConverter::new();
        let mut prev = -1.0;
        for v in 0..=255u8 {
            let rgb = Rgb8::new(v, v, v);
            let lab = lab_of(rgb);
            assert_eq!(lab, lab_of(rgb));
            assert_eq!(lab, conv.convert(rgb));
            assert!(lab.l > prev);
            prev = lab.l;
        }
    }

    #[test]
    fn test_labels_cover_every_point() {
        let samples: Vec<ColorSample> = (0..=255u8)
            .step_by(3)
            .map(|v| ColorSample::new(Rgb8::new(v, 255 - v, v / 2), 1 + v as u64 % 5))
            .collect();
        let labs = LabConverter::new().convert_samples(&samples);
        let report = cluster_samples(&samples, &labs, &Dbscan::new(4.0, 3).unwrap(), false).unwrap();

        assert_eq!(report.assignment.len(), samples.len());
        assert!(report.assignment.labels().iter().all(|&l| l >= NOISE));
        assert_eq!(report.assignment.n_clusters(), report.representatives.len());

        let again = cluster_samples(&samples, &labs, &Dbscan::new(4.0, 3).unwrap(), false).unwrap();
        assert_eq!(report.assignment.partition(), again.assignment.partition());
    }

    #[test]
    fn test_weighted_single_color_image() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("flat.png");
        RgbImage::from_pixel(4, 4, Rgb([90, 90, 90])).save(&path).unwrap();

        let samples = extract_image_colors(&path).unwrap();
        let labs = LabConverter::new().convert_samples(&samples);
        let dbscan = Dbscan::new(2.5, 2).unwrap();

        let plain = cluster_samples(&samples, &labs, &dbscan, false).unwrap();
        assert_eq!(plain.n_clusters(), 0);
        let weighted = cluster_samples(&samples, &labs, &dbscan, true).unwrap();
        assert_eq!(weighted.n_clusters(), 1);
        assert_eq!(weighted.representatives[0].total_count, 16);
    }

    #[test]
    fn test_malformed_lab_row_skipped() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("color_data_lab.txt");
        std::fs::write(
            &path,
            "sRGB Color (R, G, B), Count, LAB Color (L, A, B)\n\
             (10, 10, 10), 4, (2.75, 0.00, 0.00)\n\
             (11, 11, 11), 2, 3.04, 0.00, 0.00\n\
             (12, 12, 12), 1, (3.34, 0.00, 0.00)\n",
        )
        .unwrap();

        let rows: Vec<LabSample> = read_samples(&path, None).unwrap();
        assert_eq!(rows.len(), 2);
        let samples: Vec<ColorSample> = rows.iter().map(LabSample::sample).collect();
        let labs: Vec<LabPoint> = rows.iter().map(|r| r.lab).collect();
        let report = cluster_samples(&samples, &labs, &Dbscan::default(), false).unwrap();
        assert_eq!(report.assignment.partition(), vec![vec![0, 1]]);
        assert_eq!(report.representatives[0].sample.rgb, Rgb8::new(10, 10, 10));
    }

    #[test]
    fn test_error_kinds() {
        use hue_core::ErrorKind;

        let dir = tempdir().unwrap();
        let missing = extract_image_colors(dir.path().join("none.png")).unwrap_err();
        assert_eq!(missing.kind(), ErrorKind::NotFound);

        let junk = dir.path().join("junk.jpg");
        std::fs::write(&junk, b"not an image at all").unwrap();
        assert_eq!(extract_image_colors(&junk).unwrap_err().kind(), ErrorKind::Decode);

        let bad_json = dir.path().join("bad.json");
        std::fs::write(&bad_json, "[{\"rgb\": [1, 2]").unwrap();
        let err = read_table::<ColorSample, _>(&bad_json, None).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);

        let err = Dbscan::new(-1.0, 2).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);
    }

    #[test]
    fn test_swatch_from_group_table() {
        let dir = tempdir().unwrap();
        let (_, groups) = staged_pipeline(dir.path(), TableFormat::Json);
        let path = dir.path().join("swatch.png");
        hue_io::write_swatch(&path, &groups, 63, 5).unwrap();

        let img = image::open(&path).unwrap().into_rgb8();
        let colors: BTreeSet<[u8; 3]> = img.pixels().map(|p| p.0).collect();
        let reps: BTreeSet<[u8; 3]> = groups.iter().map(|g| g.sample.rgb.to_array()).collect();
        assert_eq!(colors, reps);

        let json = std::fs::read_to_string(dir.path().join("group_colors.json")).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.as_array().map(Vec::len), Some(groups.len()));
    }
}
