//! Registry lookup, instantiation, descriptor metadata, null handling


use rowfn_core::config::FunctionConfig;
use rowfn_core::schema::DataType;
use rowfn_core::types::Scalar;
use rowfn_functions::{eval_with_nulls, FnError, NullHandling, Registry, SetupKind};

#[test]
fn test_every_alias_resolves() {
    let registry = Registry::builtin();
    let expected = [
        ("negative", "negative"),
        ("u-", "negative"),
        ("-", "negative"),
        ("power", "power"),
        ("pi", "pi"),
        ("random", "random"),
        ("ceil", "ceil"),
        ("ceiling", "ceil"),
        ("democeil", "ceil"),
        ("floor", "floor"),
        ("demofloor", "floor"),
        ("to_number", "to_number"),
        ("TO_NUMBER", "to_number"),
    ];
    for (alias, canonical) in expected {
        let descriptor = registry
            .lookup(alias)
            .unwrap_or_else(|| panic!("alias {} missing", alias));
        assert_eq!(descriptor.primary_name(), canonical);
    }
}

#[test]
fn test_unknown_function() {
    let registry = Registry::builtin();
    assert!(registry.lookup("sqrt").is_none());
    match registry.instantiate("sqrt", &FunctionConfig::default()) {
        Err(FnError::UnknownFunction(name)) => assert_eq!(name, "sqrt"),
        Err(other) => panic!("unexpected error {:?}", other),
        Ok(_) => panic!("sqrt should not be registered"),
    }
}

#[test]
fn test_signatures() {
    let registry = Registry::builtin();
    let sig = |name: &str| registry.lookup(name).unwrap().signature;

    assert_eq!(sig("negative").inputs, &[DataType::Int64]);
    assert_eq!(sig("negative").output, DataType::Int64);
    assert_eq!(sig("power").inputs, &[DataType::Float64, DataType::Float64]);
    assert_eq!(sig("pi").arity(), 0);
    assert_eq!(sig("to_number").inputs, &[DataType::Utf8, DataType::Utf8]);
    assert_eq!(sig("to_number").output, DataType::Float64);
}

#[test]
fn test_setup_and_randomness_flags() {
    let registry = Registry::builtin();
    for descriptor in registry.descriptors() {
        assert_eq!(descriptor.null_handling, NullHandling::NullIfNull);
        assert_eq!(descriptor.is_random, descriptor.primary_name() == "random");
    }
    assert_eq!(
        registry.lookup("to_number").unwrap().setup,
        SetupKind::ConstantArgs(&[1])
    );
    assert_eq!(registry.lookup("power").unwrap().setup, SetupKind::Stateless);
}

#[test]
fn test_null_inputs_short_circuit() {
    let registry = Registry::builtin();
    let mut power = registry
        .instantiate("power", &FunctionConfig::default())
        .unwrap_or_else(|e| panic!("{}", e));

    let out = eval_with_nulls(power.as_mut(), &[Scalar::Null, Scalar::F64(2.0)]).unwrap();
    assert_eq!(out, Scalar::Null);

    let out = eval_with_nulls(power.as_mut(), &[Scalar::F64(3.0), Scalar::F64(2.0)]).unwrap();
    assert_eq!(out, Scalar::F64(9.0));
}

#[test]
fn test_instances_are_independent() {
    let registry = Registry::builtin();
    let config = FunctionConfig::default();
    let mut first = registry
        .instantiate("to_number", &config)
        .unwrap_or_else(|e| panic!("{}", e));
    let mut second = registry
        .instantiate("to_number", &config)
        .unwrap_or_else(|e| panic!("{}", e));

    assert!(first.setup(&[None, Some(Scalar::from("0.#0"))]).is_err());
    second
        .setup(&[None, Some(Scalar::from("0.0"))])
        .expect("valid pattern");

    let row = [Scalar::from("1.25"), Scalar::from("0.0")];
    assert!(first.eval(&row).is_err());
    assert_eq!(second.eval(&row).unwrap(), Scalar::F64(1.3));
}

#[test]
fn test_descriptors_serialize() {
    let registry = Registry::builtin();
    let json = serde_json::to_value(registry.lookup("to_number").unwrap()).unwrap();
    assert_eq!(json["names"][0], "to_number");
    assert_eq!(json["is_random"], false);
    assert_eq!(json["signature"]["output"], "Float64");
    assert_eq!(json["null_handling"], "NullIfNull");
}
