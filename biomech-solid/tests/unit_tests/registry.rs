use biomech_solid::registry::MaterialRegistry;
use biomech_solid::{FemMaterial, LinearMaterial, MaterialKind, MooneyRivlinMaterial};

#[test]
fn builtin_registry_contains_all_families_in_order() {
    let registry = MaterialRegistry::<f64>::with_builtin();
    let names: Vec<_> = registry.names().collect();
    assert_eq!(
        names,
        [
            "linear",
            "st_venant_kirchhoff",
            "neo_hookean",
            "incomp_neo_hookean",
            "mooney_rivlin",
            "ogden",
            "fung",
            "cubic_hyperelastic",
            "incompressible",
            "null"
        ]
    );

    for name in names {
        let material = registry.create(name).unwrap();
        assert_eq!(material.kind().name(), name);
    }
}

#[test]
fn created_materials_use_default_parameters() {
    let registry = MaterialRegistry::<f64>::with_builtin();
    let material = registry.create("mooney_rivlin").unwrap();
    let mooney_rivlin = material
        .as_any()
        .downcast_ref::<MooneyRivlinMaterial<f64>>()
        .unwrap();
    assert_eq!(mooney_rivlin, &MooneyRivlinMaterial::default());
    assert!(!material.is_viscoelastic());
}

#[test]
fn unknown_material_is_an_error() {
    let registry = MaterialRegistry::<f64>::with_builtin();
    let err = registry.create("holzapfel").unwrap_err();
    assert!(err.to_string().contains("holzapfel"));
    assert!(!registry.contains("holzapfel"));
}

#[test]
fn registration_does_not_replace_existing_factories() {
    let mut registry = MaterialRegistry::<f64>::new();
    assert!(registry.register("soft_tissue", || {
        Box::new(LinearMaterial::new(10.0, 0.45, false).unwrap())
    }));
    assert!(!registry.register("soft_tissue", || Box::new(LinearMaterial::default())));
    assert_eq!(registry.names().count(), 1);

    let material = registry.create("soft_tissue").unwrap();
    assert_eq!(material.kind(), MaterialKind::Linear);
    let linear = material
        .as_any()
        .downcast_ref::<LinearMaterial<f64>>()
        .unwrap();
    assert_eq!(linear.youngs_modulus(), 10.0);
    assert!(!material.is_corotated());
}
