//! Rendering switches, end to end.

#![allow(clippy::unwrap_used, clippy::expect_used)]
// Fixture types are reflected, never built.
#![allow(dead_code)]

use std::collections::HashMap;
use std::fs;
use std::time::SystemTime;

use chrono::{DateTime, NaiveDate, Utc};
use indoc::indoc;
use shapets::{ConfigError, Emitter, Options, Reflect, Registry};

#[derive(Reflect)]
#[serde(rename_all = "camelCase")]
struct Order {
    pub order_id: u64,
    pub placed_at: DateTime<Utc>,
    pub lines: Vec<Line>,
    #[ts(optional)]
    pub coupon: String,
}

#[derive(Reflect)]
struct Line {
    pub sku: String,
    pub qty: u32,
}

#[derive(Reflect)]
#[serde(rename_all = "camelCase")]
struct Schedule {
    pub by_key: HashMap<String, DateTime<Utc>>,
    pub holidays: Vec<NaiveDate>,
    pub due: Option<NaiveDate>,
    pub heartbeat: SystemTime,
}

fn registry(options: Options) -> Registry {
    let mut registry = Registry::new(options);
    registry.add::<Order>().unwrap();
    registry
}

#[test]
fn test_class_module() {
    let out = registry(Options::default()).render_to_string().unwrap();
    assert!(out.contains(indoc! {"
        class Order {
        \torderId: number;
        \tplacedAt: Date;
        \tlines: Line[];
        \tcoupon: string;

        \tconstructor(data?: any) {
        \t\tconst d: any = (data && typeof data === 'object') ? ToObject(data) : {};
        \t\tthis.orderId = ('orderId' in d) ? d.orderId as number : 0;
        \t\tthis.placedAt = ('placedAt' in d) ? ParseDate(d.placedAt) : new Date();
        \t\tthis.lines = Array.isArray(d.lines) ? d.lines.map((v: any) => new Line(v)) : [];
        \t\tthis.coupon = ('coupon' in d) ? d.coupon as string : '';
        \t}

        \ttoObject(): any {
        \t\tconst cfg: any = {};
        \t\tcfg.orderId = 'number';
        \t\tcfg.placedAt = 'string';
        \t\treturn ToObject(this, cfg);
        \t}
        }
    "}));
    assert!(out.contains("class Line {\n\tsku: string;\n\tqty: number;\n"));
    assert!(out.ends_with(indoc! {"
        export {
        \tOrder,
        \tLine,
        \tParseDate,
        \tParseNumber,
        \tFromArray,
        \tToObject,
        };
    "}));
}

#[test]
fn test_dates_round_trip_in_their_wire_format() {
    let mut registry = Registry::new(Options::default());
    registry.add::<Schedule>().unwrap();
    let out = registry.render_to_string().unwrap();

    assert!(out.contains(indoc! {"
        \ttoObject(): any {
        \t\tconst cfg: any = {};
        \t\tcfg.byKey = 'string';
        \t\tcfg.holidays = 'date';
        \t\tcfg.due = 'date';
        \t\treturn ToObject(this, cfg);
        \t}
    "}));
    // Map values inherit the hint; calendar dates drop the time of day.
    assert!(out.contains("const hint: any = typeof typeOrCfg === 'string' ? typeOrCfg : null;"));
    assert!(out.contains("return o.toISOString().slice(0, 10);"));

    // Serde writes `SystemTime` as a struct.
    assert!(out.contains("\theartbeat: SystemTime;\n"));
    assert!(out.contains("\t\tthis.heartbeat = new SystemTime(d.heartbeat);\n"));
    assert!(out.contains(indoc! {"
        class SystemTime {
        \tsecs_since_epoch: number;
        \tnanos_since_epoch: number;
    "}));

    let mut plain = Registry::new(Options {
        no_date: true,
        no_helpers: true,
        ..Options::interfaces()
    });
    plain.add::<Schedule>().unwrap();
    let out = plain.render_to_string().unwrap();
    assert!(out.contains(indoc! {"
        \tbyKey: { [key: string]: string };
        \tholidays: string[];
        \tdue: string | null;
        \theartbeat: SystemTime;
    "}));
}

#[test]
fn test_mark_optional() {
    let plain = registry(Options::interfaces()).render_to_string().unwrap();
    assert!(plain.contains("\tcoupon: string;\n"));

    let marked = registry(Options {
        mark_optional: true,
        ..Options::interfaces()
    })
    .render_to_string()
    .unwrap();
    assert!(marked.contains("\tcoupon?: string;\n"));
}

#[test]
fn test_class_switches() {
    let out = registry(Options {
        no_constructor: true,
        no_to_object: true,
        no_helpers: true,
        no_exports: true,
        ..Options::default()
    })
    .render_to_string()
    .unwrap();
    assert!(out.contains(indoc! {"
        class Line {
        \tsku: string = '';
        \tqty: number = 0;
        }
    "}));
    assert!(!out.contains("constructor"));
    assert!(!out.contains("toObject"));
    assert!(!out.contains("// helpers"));
}

#[test]
fn test_one_registry_many_renderings() {
    let registry = registry(Options::default());

    let es6 = Options {
        es6: true,
        no_helpers: true,
        ..Options::default()
    };
    let mut out = Vec::new();
    Emitter::new(&registry, &es6).render_to(&mut out).unwrap();
    let out = String::from_utf8(out).unwrap();
    assert!(out.starts_with("'use strict';\n"));
    assert!(out.contains("\t\tthis.orderId = ('orderId' in d) ? d.orderId : 0;\n"));
    assert!(out.contains(
        "\t\tthis.lines = Array.isArray(d.lines) ? d.lines.map((v) => new Line(v)) : [];\n"
    ));
    assert!(out.ends_with("exports.Order = Order;\nexports.Line = Line;\n"));

    let raw_dates = Options {
        no_date: true,
        ..Options::interfaces()
    };
    let mut out = Vec::new();
    Emitter::new(&registry, &raw_dates).render_to(&mut out).unwrap();
    let out = String::from_utf8(out).unwrap();
    assert!(out.contains("\tplacedAt: string;\n"));
    assert!(!out.contains("constructor"));
}

#[test]
fn test_options_from_manifest_file() {
    let dir = tempfile::tempdir().unwrap();
    let manifest = dir.path().join("Cargo.toml");
    fs::write(
        &manifest,
        indoc! {r#"
            [package]
            name = "storefront"
            version = "0.1.0"

            [package.metadata.shapets]
            indent = "  "
            interface-only = true
            mark-optional = true
            no-helpers = true
        "#},
    )
    .unwrap();

    let options = Options::load(&manifest).unwrap();
    let out = registry(options).render_to_string().unwrap();
    assert!(out.contains(indoc! {"
        export interface Order {
          orderId: number;
          placedAt: Date;
          lines: Line[];
          coupon?: string;
        }
    "}));
    assert!(!out.contains("// exports"));
}

#[test]
fn test_invalid_options_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("shapets.toml");
    fs::write(&path, "interface_only = true\n").unwrap();

    let err = Options::load(&path).unwrap_err();
    assert!(matches!(err, ConfigError::Parse(_)));
    assert!(err.to_string().starts_with("invalid shapets options"));
}
