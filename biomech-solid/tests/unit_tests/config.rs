use biomech_solid::config::{MaterialConfig, ModelConfig};
use biomech_solid::{
    BulkParameters, BulkPotential, FemMaterial, LinearParameters, MaterialKind, MooneyRivlinMaterial, NullMaterial,
    QlvBehavior, YoungPoisson,
};

#[test]
fn material_config_from_json() {
    let json = r#"{
        "model": { "type": "mooney_rivlin", "c10": 300.0, "c01": 50.0 },
        "visco_behavior": { "gamma_inf": 0.5, "terms": [ { "gamma": 0.5, "tau": 0.1 } ] }
    }"#;
    let config: MaterialConfig<f64> = serde_json::from_str(json).unwrap();
    assert_eq!(config.model.kind(), MaterialKind::MooneyRivlin);

    let material = config.build().unwrap();
    assert_eq!(material.kind(), MaterialKind::MooneyRivlin);
    assert!(material.has_state());

    let mooney_rivlin = material
        .as_any()
        .downcast_ref::<MooneyRivlinMaterial<f64>>()
        .unwrap();
    assert_eq!(mooney_rivlin.parameters().c10, 300.0);
    assert_eq!(mooney_rivlin.parameters().c01, 50.0);
    assert_eq!(mooney_rivlin.parameters().c11, 0.0);
    assert_eq!(mooney_rivlin.parameters().bulk, BulkParameters::default());

    let behavior = material
        .visco_behavior()
        .unwrap()
        .as_any()
        .downcast_ref::<QlvBehavior<f64>>()
        .unwrap();
    assert_eq!(behavior.relaxation_time(0), Some(0.1));
}

#[test]
fn omitted_parameters_take_defaults() {
    let config: MaterialConfig<f64> = serde_json::from_str(r#"{ "model": { "type": "linear" } }"#).unwrap();
    assert_eq!(config.model, ModelConfig::Linear(LinearParameters::default()));
    assert_eq!(config.visco_behavior, None);

    let config: MaterialConfig<f64> = serde_json::from_str(
        r#"{ "model": { "type": "incompressible", "bulk_modulus": 5000.0, "potential": "logarithmic" } }"#,
    )
    .unwrap();
    let expected = BulkParameters {
        bulk_modulus: 5000.0,
        potential: BulkPotential::Logarithmic,
    };
    assert_eq!(config.model, ModelConfig::Incompressible(expected));
    let material = config.build().unwrap();
    assert_eq!(material.bulk_parameters(), Some(&expected));

    let behavior: QlvBehavior<f64> = serde_json::from_str(r#"{ "gamma_inf": 1.0 }"#).unwrap();
    assert_eq!(behavior.gamma_inf(), 1.0);
    assert!(behavior.terms().is_empty());
}

#[test]
fn null_model_builds_null_material() {
    let config: MaterialConfig<f64> = serde_json::from_str(r#"{ "model": { "type": "null" } }"#).unwrap();
    let material = config.build().unwrap();
    assert!(material.as_any().is::<NullMaterial<f64>>());
}

#[test]
fn invalid_parameters_are_reported_on_build() {
    let config = MaterialConfig::new(ModelConfig::NeoHookean(YoungPoisson {
        young: 1000.0,
        poisson: 0.6,
    }));
    let err = config.build().unwrap_err();
    assert!(err.to_string().contains("PoissonsRatio"));

    let config: MaterialConfig<f64> = serde_json::from_str(
        r#"{
            "model": { "type": "st_venant_kirchhoff" },
            "visco_behavior": { "gamma_inf": 0.5, "terms": [ { "gamma": 0.5, "tau": -1.0 } ] }
        }"#,
    )
    .unwrap();
    let err = config.build().unwrap_err();
    assert!(err.to_string().contains("viscoelastic"));
    assert!(err.root_cause().to_string().contains("tau"));
}

#[test]
fn unknown_model_type_is_rejected() {
    let result = serde_json::from_str::<MaterialConfig<f64>>(r#"{ "model": { "type": "holzapfel" } }"#);
    assert!(result.is_err());
}

#[test]
fn material_config_survives_serialization() {
    let config = MaterialConfig::new(ModelConfig::Linear(LinearParameters {
        elastic: YoungPoisson {
            young: 2000.0,
            poisson: 0.25,
        },
        corotated: false,
    }))
    .with_visco_behavior(QlvBehavior::single_term(0.7, 0.3, 2.0).unwrap());

    let json = serde_json::to_string(&config).unwrap();
    let parsed: MaterialConfig<f64> = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed, config);

    let material = parsed.build().unwrap();
    assert!(material.is_viscoelastic());
    assert!(!material.is_corotated());
}
