use super::*;
use serde_json::json;

fn inst(kind: &str, params: serde_json::Value) -> FilterInstance {
    FilterInstance {
        kind: kind.to_owned(),
        params,
    }
}

#[test]
fn colorize_defaults_and_clamping() {
    let d = parse_filter(&inst("Colorize", serde_json::Value::Null)).unwrap();
    assert_eq!(
        d,
        FilterDescriptor::Colorize {
            color: [0, 0, 192],
            strength: 1.0
        }
    );
    let i = inst("colorize", json!({"strength": 4.0, "color": [1, 2, 3]}));
    let d = parse_filter(&i).unwrap();
    assert_eq!(
        d,
        FilterDescriptor::Colorize {
            color: [1, 2, 3],
            strength: 1.0
        }
    );
}

#[test]
fn drop_shadow_aliases_share_defaults() {
    let want = FilterDescriptor::DropShadow {
        offset: [8.0, 8.0],
        radius: 1.0,
        color: [63, 63, 63, 180],
        hint: BlurHint::Performance,
    };
    for kind in ["DropShadow", "drop_shadow", " drop-shadow "] {
        assert_eq!(parse_filter(&inst(kind, json!({}))).unwrap(), want);
    }
}

#[test]
fn drop_shadow_params() {
    let d = parse_filter(&inst(
        "drop_shadow",
        json!({"offset": [-1, 2.5], "radius": 3, "color": [0, 0, 0, 255], "hint": "quality"}),
    ))
    .unwrap();
    assert_eq!(
        d,
        FilterDescriptor::DropShadow {
            offset: [-1.0, 2.5],
            radius: 3.0,
            color: [0, 0, 0, 255],
            hint: BlurHint::Quality,
        }
    );
}

#[test]
fn malformed_params_are_rejected() {
    let bad = [
        inst("drop_shadow", json!({"offset": [1]})),
        inst("drop_shadow", json!({"color": [0, 0, 0]})),
        inst("drop_shadow", json!({"color": [0, 0, 0, 256]})),
        inst("drop_shadow", json!({"hint": "fastest"})),
        inst("blur", json!({"radius": -1})),
        inst("blur", json!({"radius": "big"})),
        inst("colorize", json!({"strength": true})),
        inst(
            "convolution",
            json!({"kernel": [1, 2, 3], "rows": 1, "columns": 2}),
        ),
        inst("convolution", json!({"kernel": [1], "columns": 1})),
        inst(
            "convolution",
            json!({"kernel": [1], "rows": 1, "columns": 1, "convolve_alpha": 1}),
        ),
        inst("sharpen", json!({})),
        inst("  ", json!({})),
    ];
    for i in &bad {
        assert!(parse_filter(i).is_err(), "{i:?}");
    }
}

#[test]
fn convolution_defaults_to_convolving_alpha() {
    let d = parse_filter(&inst(
        "convolve",
        json!({"kernel": [0, 1, 0, 1], "rows": 2, "columns": 2}),
    ))
    .unwrap();
    assert_eq!(
        d,
        FilterDescriptor::Convolution {
            kernel: vec![0.0, 1.0, 0.0, 1.0],
            rows: 2,
            columns: 2,
            convolve_alpha: true,
        }
    );
}

#[test]
fn chain_accepts_object_or_array() {
    let one = parse_filter_chain(r#"{"kind": "blur"}"#).unwrap();
    assert_eq!(
        one,
        vec![FilterDescriptor::Blur {
            radius: 5.0,
            hint: BlurHint::Performance
        }]
    );

    let many = parse_filter_chain(
        r#"[{"kind": "colorize", "params": {"strength": 0.5}},
            {"kind": "drop_shadow", "params": {"radius": 0}}]"#,
    )
    .unwrap();
    assert_eq!(many.len(), 2);
    let FilterDescriptor::Colorize { strength, .. } = many[0] else {
        panic!("expected colorize, got {:?}", many[0]);
    };
    assert_eq!(strength, 0.5);
    let FilterDescriptor::DropShadow { radius, .. } = many[1] else {
        panic!("expected drop shadow, got {:?}", many[1]);
    };
    assert_eq!(radius, 0.0);

    assert!(matches!(
        parse_filter_chain("[{"),
        Err(RasterError::Serde(_))
    ));
    assert!(parse_filter_chain(r#"[{"params": {}}]"#).is_err());
}

#[test]
fn descriptors_serialize_with_kind_tag() {
    let d = FilterDescriptor::Blur {
        radius: 2.0,
        hint: BlurHint::Animation,
    };
    let v = serde_json::to_value(&d).unwrap();
    let want = json!({"kind": "blur", "radius": 2.0, "hint": "animation"});
    assert_eq!(v, want);
    let back: FilterDescriptor = serde_json::from_value(v).unwrap();
    assert_eq!(back, d);
}

#[test]
fn drop_shadow_offset_serializes_as_plain_array() {
    let d = FilterDescriptor::DropShadow {
        offset: [4.0, -1.5],
        radius: 0.0,
        color: [0, 0, 0, 255],
        hint: BlurHint::Performance,
    };
    let v = serde_json::to_value(&d).unwrap();
    assert_eq!(v["kind"], "drop_shadow");
    assert_eq!(v["offset"], json!([4.0, -1.5]));
    let back: FilterDescriptor = serde_json::from_value(v).unwrap();
    assert_eq!(back, d);
}

#[test]
fn build_produces_matching_filters() {
    let chain = [
        FilterDescriptor::Colorize {
            color: [10, 20, 30],
            strength: 0.25,
        },
        FilterDescriptor::DropShadow {
            offset: [1.0, -2.0],
            radius: 0.5,
            color: [0, 0, 0, 255],
            hint: BlurHint::Quality,
        },
        FilterDescriptor::Blur {
            radius: 3.0,
            hint: BlurHint::Performance,
        },
        FilterDescriptor::Convolution {
            kernel: vec![1.0],
            rows: 1,
            columns: 1,
            convolve_alpha: false,
        },
    ];
    for d in &chain {
        assert_eq!(&d.build().unwrap().descriptor(), d);
    }
    let bad = FilterDescriptor::Blur {
        radius: -2.0,
        hint: BlurHint::Performance,
    };
    assert!(bad.build().is_err());
}
