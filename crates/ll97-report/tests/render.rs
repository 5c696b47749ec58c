//! End-to-end rendering checks against parsed PDF output.

use base64::{engine::general_purpose::STANDARD, Engine as _};
use image::{ImageFormat, Rgba, RgbaImage};
use ll97_core::{calculate, BuildingInput, EmissionsFactorTable, FactorTables, LimitFactorTable, UtilityUsage};
use ll97_report::{decode_chart_payload, render_report};
use lopdf::{Document, Object};
use std::collections::BTreeMap;
use std::io::Cursor;

fn tables(periods: usize) -> FactorTables {
    let mut emissions = EmissionsFactorTable::new();
    let mut office = BTreeMap::new();
    for i in 0..periods {
        let label = format!("{}", 2024 + i);
        emissions.insert(
            label.clone(),
            BTreeMap::from([("electricity_kwh".to_string(), 0.0005)]),
        );
        office.insert(label, 0.01);
    }
    let mut limits = LimitFactorTable::new();
    limits.insert("Office".into(), office);
    FactorTables::new(emissions, limits)
}

fn sample_result(periods: usize, use_types: usize) -> ll97_core::CalculationResult {
    let mut building = BuildingInput::new("Tower One").with_use_type("Office", 10_000.0);
    for i in 0..use_types {
        building = building.with_use_type(format!("Custom Use {i:03}"), 1_000.0 + i as f64);
    }
    let usage = UtilityUsage {
        electricity: 1_000.0,
        ..Default::default()
    };
    calculate(&tables(periods), &building, &usage)
}

fn png(width: u32, height: u32) -> Vec<u8> {
    let img = RgbaImage::from_pixel(width, height, Rgba([37, 99, 235, 255]));
    let mut out = Cursor::new(Vec::new());
    img.write_to(&mut out, ImageFormat::Png).unwrap();
    out.into_inner()
}

fn image_xobjects(doc: &Document) -> usize {
    doc.objects
        .values()
        .filter(|object| match object {
            Object::Stream(stream) => matches!(
                stream.dict.get(b"Subtype"),
                Ok(Object::Name(name)) if name.as_slice() == b"Image"
            ),
            _ => false,
        })
        .count()
}

#[test]
fn renders_single_page_pdf() {
    let bytes = render_report(&sample_result(3, 0), None).unwrap();
    assert!(bytes.starts_with(b"%PDF"));

    let doc = Document::load_mem(&bytes).unwrap();
    assert_eq!(doc.get_pages().len(), 1);
    assert_eq!(image_xobjects(&doc), 0);
}

#[test]
fn rendering_is_deterministic() {
    let result = sample_result(3, 2);
    assert_eq!(
        render_report(&result, None).unwrap(),
        render_report(&result, None).unwrap()
    );
}

#[test]
fn long_area_table_spans_pages() {
    let bytes = render_report(&sample_result(3, 80), None).unwrap();
    let doc = Document::load_mem(&bytes).unwrap();
    assert!(doc.get_pages().len() >= 2);
}

#[test]
fn many_periods_are_scaled_to_fit() {
    let result = sample_result(12, 0);
    assert_eq!(result.periods.len(), 12);
    let bytes = render_report(&result, None).unwrap();
    let doc = Document::load_mem(&bytes).unwrap();
    assert_eq!(doc.get_pages().len(), 1);
}

#[test]
fn empty_result_renders() {
    let tables = FactorTables::new(EmissionsFactorTable::new(), LimitFactorTable::new());
    let result = calculate(&tables, &BuildingInput::new(""), &UtilityUsage::default());
    let bytes = render_report(&result, None).unwrap();
    assert!(Document::load_mem(&bytes).is_ok());
}

#[test]
fn chart_image_is_embedded() {
    let result = sample_result(3, 0);
    let url = format!("data:image/png;base64,{}", STANDARD.encode(png(1_080, 540)));
    let chart = decode_chart_payload(&url).unwrap();

    let bytes = render_report(&result, Some(&chart)).unwrap();
    let doc = Document::load_mem(&bytes).unwrap();
    assert_eq!(image_xobjects(&doc), 1);
    assert_ne!(bytes, render_report(&result, None).unwrap());
}

#[test]
fn chart_after_long_tables_moves_to_next_page() {
    let result = sample_result(3, 25);
    let chart = png(600, 600);
    let without = Document::load_mem(&render_report(&result, None).unwrap()).unwrap();
    let with = Document::load_mem(&render_report(&result, Some(&chart)).unwrap()).unwrap();
    assert_eq!(with.get_pages().len(), without.get_pages().len() + 1);
}

#[test]
fn truncated_chart_matches_no_chart() {
    let result = sample_result(3, 0);
    let encoded = STANDARD.encode(png(64, 64));
    let truncated = format!("data:image/png;base64,{}", &encoded[..encoded.len() / 2]);
    let expected = render_report(&result, None).unwrap();

    // Either the base64 or the PNG itself fails to decode.
    let decoded = decode_chart_payload(&truncated);
    let rendered = render_report(&result, decoded.as_deref()).unwrap();
    assert_eq!(rendered, expected);

    let garbage = render_report(&result, Some(b"definitely not an image")).unwrap();
    assert_eq!(garbage, expected);
}
