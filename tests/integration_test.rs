use croc::builders::CurveType;
use croc::curve::Curve;
use croc::driver::{self, CurveReport, CurveSettings, InputFormat};
use croc::errors::InvalidInput;
use croc::output::{OSampled, Summary};
use croc::scored_data::{ScoredData, TieMode};
use croc::transform::Transform;
use std::fs;
use std::path::PathBuf;

fn init() {
    let _ = pretty_env_logger::formatted_timed_builder()
        .filter_level(log::LevelFilter::Trace)
        .is_test(true)
        .try_init();
}

fn slurp(filename: &str) -> String {
    let dir = env!("CARGO_MANIFEST_DIR");
    let mut path = PathBuf::from(dir);
    path.push(filename);
    fs::read_to_string(path).unwrap()
}

fn read(filename: &str, format: InputFormat) -> ScoredData {
    driver::read_scored_data(slurp(filename).as_bytes(), format).unwrap()
}

fn assert_close(a: f64, b: f64) {
    assert!((a - b).abs() < 1e-12, "{a} != {b}");
}

#[test]
fn test_scored_file() {
    init();
    let data = read("sample-data/example.scored", InputFormat::Scored);
    assert_eq!(data.len(), 15);
    assert_eq!(data.positives(), 5);
    assert_eq!(data.negatives(), 10);
    assert_eq!(data.mixed_tie_count(), 2);
    let report = driver::calc_curve(&CurveSettings::default(), &data).unwrap();
    // every tie between a positive and a negative counts as half a win
    assert_close(report.area(), 0.79);
    let curve = report.curve();
    assert_eq!(curve.points().first(), Some(&(0.0, 0.0)));
    assert_eq!(curve.points().last(), Some(&(1.0, 1.0)));
}

#[test]
fn test_rank_files() {
    init();
    let r0 = read("sample-data/example.ranks0", InputFormat::Ranks0);
    let r1 = read("sample-data/example.ranks1", InputFormat::Ranks1);
    assert_eq!(r0, r1);
    assert_eq!(r0.mixed_tie_count(), 0);
    let settings = CurveSettings::default();
    let report = driver::calc_curve(&settings, &r0).unwrap();
    assert_close(report.area(), 0.75);
    assert_eq!(driver::calc_best(&settings, &r0).unwrap().area(), 1.0);
    assert_eq!(driver::calc_worst(&settings, &r0).unwrap().area(), 0.0);
    let ignore = CurveSettings {
        tie_mode: TieMode::Ignore,
        ..Default::default()
    };
    assert_eq!(driver::calc_curve(&ignore, &r0).unwrap(), report);
}

#[test]
fn test_tie_modes() {
    init();
    let data = read("sample-data/example.scored", InputFormat::Scored);
    let ignore = CurveSettings {
        tie_mode: TieMode::Ignore,
        ..Default::default()
    };
    let sample = CurveSettings {
        tie_mode: TieMode::Sample,
        samples: 200,
        seed: 1234,
        ..Default::default()
    };
    let smooth = driver::calc_curve(&CurveSettings::default(), &data).unwrap().area();
    let ignored = driver::calc_curve(&ignore, &data).unwrap().area();
    // both ties list the positive first
    assert!(ignored > smooth);
    let sampled = driver::calc_curve(&sample, &data).unwrap();
    let (std_dev, n) = match &sampled {
        CurveReport::Sampled(s) => (s.std_dev.unwrap(), s.samples),
        CurveReport::Single { .. } => panic!("expected a sampled curve"),
    };
    assert_eq!(n, 200);
    assert!(std_dev > 0.0);
    assert!((sampled.area() - smooth).abs() < 0.02);
    assert_eq!(sampled, driver::calc_curve(&sample, &data).unwrap());
}

#[test]
fn test_curve_types() {
    init();
    let data = read("sample-data/example.scored", InputFormat::Scored);
    let area = |curve_type| {
        let settings = CurveSettings {
            curve_type,
            ..Default::default()
        };
        driver::calc_curve(&settings, &data).unwrap().area()
    };
    let ceiling = area(CurveType::CeilingAc);
    let slanted = area(CurveType::SlantedAc);
    let floor = area(CurveType::FloorAc);
    assert!(ceiling > slanted && slanted > floor);
    assert_close(ceiling - floor, 1.0 / 15.0);
}

#[test]
fn test_transformed_random() {
    init();
    let data = read("sample-data/example.scored", InputFormat::Scored);
    let settings = CurveSettings {
        curve_type: CurveType::SlantedAc,
        transform: "exponential(20)".parse::<Transform>().unwrap(),
        samples: 100,
        seed: 5,
        ..Default::default()
    };
    let actual = driver::calc_curve(&settings, &data).unwrap().area();
    let best = driver::calc_best(&settings, &data).unwrap().area();
    let worst = driver::calc_worst(&settings, &data).unwrap().area();
    let random = driver::calc_random(&settings, &data).unwrap();
    assert!(best > actual && actual > random.mean_area && random.mean_area > worst);
    let s = OSampled::from(&random);
    assert_eq!(s.samples, 100);
    assert!(s.std_error.unwrap() < s.std_deviation.unwrap());
}

#[test]
fn test_bedroc() {
    init();
    let data = read("sample-data/example.scored", InputFormat::Scored);
    let b = driver::calc_bedroc(&data, driver::DEFAULT_ALPHA).unwrap();
    assert!(b.bedroc > 0.5 && b.bedroc < 1.0, "{}", b.bedroc);
    assert_close(b.normalize(b.area), b.bedroc);
    let random = driver::calc_random_bedroc(&data, driver::DEFAULT_ALPHA, 100, 0).unwrap();
    assert!(b.normalize(random.mean_area) < b.bedroc);
    let mut summary = Summary {
        alpha: Some(driver::DEFAULT_ALPHA),
        bedroc: Some(b.bedroc),
        ..Default::default()
    };
    summary.random = Some(OSampled::from(&random));
    let json = serde_json::to_value(&summary).unwrap();
    assert_eq!(json["alpha"], 20.0);
    assert_eq!(json["random"]["samples"], 100);
    assert!(json.get("curve_type").is_none());
}

#[test]
fn test_average_files() {
    init();
    let a = Curve::read_from(slurp("sample-data/diagonal.curve").as_bytes()).unwrap();
    let b = Curve::read_from(slurp("sample-data/step.curve").as_bytes()).unwrap();
    let avg = Curve::average(&[a, b]).unwrap();
    assert_eq!(
        avg.points(),
        &[(0.0, 0.0), (0.0, 0.25), (1.0, 0.75), (1.0, 1.0)]
    );
    assert_eq!(avg.area(), 0.5);
    let mut out = Vec::new();
    avg.write_to(&mut out).unwrap();
    assert_eq!(String::from_utf8(out).unwrap(), "0 0\n0 0.25\n1 0.75\n1 1\n");
}

#[test]
fn test_malformed() {
    init();
    let e = driver::read_scored_data(
        slurp("sample-data/malformed.scored").as_bytes(),
        InputFormat::Scored,
    )
    .unwrap_err();
    assert!(e.downcast_ref::<InvalidInput>().is_some());
    assert!(format!("{e}").contains("line 2"));
}
