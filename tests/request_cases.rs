use std::collections::HashMap;

use kba_publications::{GlyphDecoding, ParseOptions, Publication};
use kba_publications_worker::cache::result_cache_key;
use kba_publications_worker::config::WorkerConfig;
use kba_publications_worker::error::ApiError;
use kba_publications_worker::routes::{
    CacheStatus, build_parse_response, check_upload_size, parse_flag, parse_publication_query,
    parse_source_url,
};
use lopdf::content::{Content, Operation};
use lopdf::{Document, Object, Stream, dictionary};
use pretty_assertions::assert_eq;

fn query(pairs: &[(&str, &str)]) -> HashMap<String, String> {
    pairs
        .iter()
        .map(|(key, value)| ((*key).to_string(), (*value).to_string()))
        .collect()
}

fn energy_source_pdf() -> Vec<u8> {
    let tm = |x: i64, y: i64| {
        Operation::new(
            "Tm",
            vec![
                Object::Integer(1),
                Object::Integer(0),
                Object::Integer(0),
                Object::Integer(1),
                Object::Integer(x),
                Object::Integer(y),
            ],
        )
    };
    let tj = |text: &str| Operation::new("Tj", vec![Object::string_literal(text)]);
    let content = Content {
        operations: vec![
            Operation::new("BT", vec![]),
            tm(66, 780),
            tj("Kraftstoffart bzw. Energiequelle"),
            tm(191, 600),
            tj("Elektro"),
            tm(337, 600),
            tj("0004"),
            Operation::new("ET", vec![]),
        ],
    };

    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();
    let content_id = doc.add_object(Stream::new(
        dictionary! {},
        content.encode().expect("content should encode"),
    ));
    let page_id = doc.add_object(dictionary! {
        "Type" => "Page",
        "Parent" => pages_id,
        "Contents" => content_id,
    });
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => vec![page_id.into()],
            "Count" => Object::Integer(1),
        }),
    );
    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    let mut bytes = Vec::new();
    doc.save_to(&mut bytes).expect("PDF should serialize");
    bytes
}

#[test]
fn publication_query_falls_back_to_configured_default() {
    let empty = query(&[]);
    assert_eq!(
        parse_publication_query(&empty, Publication::VehicleRegistry).expect("default"),
        Publication::VehicleRegistry
    );

    let taxonomy = query(&[("publication", "taxonomy")]);
    assert_eq!(
        parse_publication_query(&taxonomy, Publication::VehicleRegistry).expect("explicit"),
        Publication::TaxonomyDirectory
    );

    let unknown = query(&[("publication", "sv7")]);
    let error = parse_publication_query(&unknown, Publication::Auto).expect_err("unknown");
    assert_eq!(error.status_code(), 400);
}

#[test]
fn source_url_must_be_http() {
    let ok = query(&[("url", " https://www.kba.de/sv42.pdf ")]);
    assert_eq!(
        parse_source_url(&ok).expect("valid url").as_str(),
        "https://www.kba.de/sv42.pdf"
    );

    assert!(matches!(
        parse_source_url(&query(&[])),
        Err(ApiError::BadRequest(_))
    ));
    assert!(matches!(
        parse_source_url(&query(&[("url", "file:///etc/passwd")])),
        Err(ApiError::BadRequest(_))
    ));
}

#[test]
fn flags_accept_common_truthy_values() {
    assert!(parse_flag(&query(&[("force", "YES")]), "force"));
    assert!(parse_flag(&query(&[("force", "1")]), "force"));
    assert!(!parse_flag(&query(&[("force", "0")]), "force"));
    assert!(!parse_flag(&query(&[]), "force"));
}

#[test]
fn upload_limit_is_inclusive() {
    assert!(check_upload_size(10, 10).is_ok());
    let error = check_upload_size(11, 10).expect_err("over the limit");
    assert_eq!(error.status_code(), 413);
    assert_eq!(error.code(), "payload_too_large");
}

#[test]
fn config_reads_overrides_and_rejects_garbage() {
    let env = HashMap::from([
        ("MAX_UPLOAD_BYTES", "2048"),
        ("DEFAULT_PUBLICATION", "taxonomy"),
        ("GLYPH_DECODING", "windows1252"),
        ("RESULT_CACHE_TTL_SECONDS", " "),
    ]);
    let config = WorkerConfig::from_lookup(|name| env.get(name).map(|v| (*v).to_string()))
        .expect("config should load");
    assert_eq!(
        config,
        WorkerConfig {
            max_upload_bytes: 2048,
            default_publication: Publication::TaxonomyDirectory,
            decoding: GlyphDecoding::Windows1252,
            ..WorkerConfig::default()
        }
    );

    let error = WorkerConfig::from_lookup(|name| {
        (name == "MAX_UPLOAD_BYTES").then(|| "ten megabytes".to_string())
    })
    .expect_err("not a number");
    assert_eq!(error.code(), "config_error");
}

#[test]
fn builds_success_envelope() {
    let options = ParseOptions::for_publication(Publication::TaxonomyDirectory);
    let response = build_parse_response(&energy_source_pdf(), &options).expect("parse");
    let json = serde_json::to_value(&response).expect("json");
    assert_eq!(
        json,
        serde_json::json!({
            "success": true,
            "data": [{
                "total": 1,
                "entityType": "EnergySource",
                "items": [{ "shortName": "Elektro", "code": "0004" }]
            }]
        })
    );
}

#[test]
fn broken_upload_maps_to_unprocessable() {
    let error = build_parse_response(b"%PDF-garbage", &ParseOptions::default())
        .expect_err("garbage is not a document");
    assert_eq!(error.status_code(), 422);
}

#[test]
fn cache_keys_separate_publications() {
    let url = "https://www.kba.de/sv1.pdf";
    assert_ne!(
        result_cache_key("taxonomy", url),
        result_cache_key("auto", url)
    );
    assert_eq!(CacheStatus::Bypass.as_header_value(), "BYPASS");
}
