use biomech_joints::Interval;

#[test]
fn interval_clip_and_contains() {
    let interval = Interval::new(-30.0, 30.0);
    assert_eq!(interval.clip(45.0), 30.0);
    assert_eq!(interval.clip(-45.0), -30.0);
    assert_eq!(interval.clip(10.0), 10.0);
    assert!(interval.contains(30.0));
    assert!(!interval.contains(30.5));
    assert!(interval.is_bounded());

    let unbounded = Interval::default();
    assert_eq!(unbounded, Interval::unbounded());
    assert!(!unbounded.is_bounded());
    assert_eq!(unbounded.clip(1e300), 1e300);
    assert!(Interval::new(0.0, f64::INFINITY).is_bounded());
}

#[test]
fn interval_display() {
    assert_eq!(Interval::unbounded().to_string(), "[-inf, inf]");
    assert_eq!(Interval::new(-30.0, 30.5).to_string(), "[-30, 30.5]");
}

#[test]
fn interval_parse() {
    assert_eq!("[-inf, inf]".parse::<Interval>().unwrap(), Interval::unbounded());
    assert_eq!(" [ -30, 30.5 ] ".parse::<Interval>().unwrap(), Interval::new(-30.0, 30.5));
    assert_eq!("[0,+inf]".parse::<Interval>().unwrap(), Interval::new(0.0, f64::INFINITY));

    let interval = Interval::new(-1.25, 4.0);
    assert_eq!(interval.to_string().parse::<Interval>().unwrap(), interval);

    assert!("".parse::<Interval>().is_err());
    assert!("[1, 2".parse::<Interval>().is_err());
    assert!("[1 2]".parse::<Interval>().is_err());
    assert!("[a, 2]".parse::<Interval>().is_err());
    assert!("[NaN, 2]".parse::<Interval>().is_err());

    let err = "(1, 2)".parse::<Interval>().unwrap_err();
    assert!(err.to_string().contains("(1, 2)"));
}

#[test]
fn interval_serde() {
    let interval = Interval::new(-2.0, 3.0);
    let json = serde_json::to_string(&interval).unwrap();
    let parsed: Interval = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed, interval);

    let parsed: Interval = serde_json::from_str(r#"{ "lower": -1.0, "upper": 1.0 }"#).unwrap();
    assert_eq!(parsed, Interval::new(-1.0, 1.0));
}
