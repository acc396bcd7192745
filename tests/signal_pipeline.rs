//! Integration tests for the formula to classification pipeline.
//!
//! Covers the public API end to end: compiling user formulas, evaluating
//! the domain signals, integrating sampled energy, classifying user and
//! catalog signals, and the error surface seen by a caller.
use sigform::formula::compile;
use sigform::signal::{
    SignalDurationKind, TimeGrid, classify, integrate_energy, linspace, simpson_energy,
    trapezoidal_energy,
};
use sigform::{
    AnalysisOptions, Catalog, EnergyClass, Error, FormulaCache, IntegrationMethod, ParseError,
    PreconditionError, analyze_all, analyze_formula, format_energy,
};

fn eval(source: &str, t: f64) -> f64 {
    compile(source).expect("formula compiles").evaluate(t)
}

#[test]
fn evaluation_is_deterministic() {
    let program = compile("2*sin(pi*t)*rect(t/2) + delta(t) - log(t)").expect("compile");
    for t in linspace(-3.0, 3.0, 257) {
        assert_eq!(program.evaluate(t).to_bits(), program.evaluate(t).to_bits());
    }
}

#[test]
fn rect_boundaries_are_exclusive() {
    for t in [-0.49, -0.1, 0.0, 0.1, 0.49] {
        assert_eq!(eval("rect(t)", t), 1.0);
    }
    for t in [-2.0, -0.51, 0.51, 2.0] {
        assert_eq!(eval("rect(t)", t), 0.0);
    }
    assert_eq!(eval("rect(t)", 0.5), 0.0);
    assert_eq!(eval("rect(t)", -0.5), 0.0);
}

#[test]
fn tri_and_step_values() {
    assert_eq!(eval("tri(t)", 0.0), 1.0);
    assert_eq!(eval("tri(t)", 1.0), 0.0);
    assert_eq!(eval("tri(t)", 2.0), 0.0);
    assert!((eval("tri(t)", -0.3) - 0.7).abs() < 1e-12);
    assert_eq!(eval("u(t)", 0.0), 1.0);
    assert_eq!(eval("u(t)", -1e-9), 0.0);
}

#[test]
fn implicit_multiplication_is_equivalent() {
    let pairs = [
        ("2t", "2*t"),
        ("3(t+1)", "3*(t+1)"),
        ("(t+1)2", "(t+1)*2"),
        ("(t+1)(t-1)", "(t+1)*(t-1)"),
        ("2π*t", "2*pi*t"),
        ("t^2 × 3 ÷ 4", "t**2*3/4"),
    ];
    for (implicit, explicit) in pairs {
        let a = compile(implicit).expect("implicit form compiles");
        let b = compile(explicit).expect("explicit form compiles");
        for t in linspace(-5.0, 5.0, 101) {
            assert_eq!(
                a.evaluate(t).to_bits(),
                b.evaluate(t).to_bits(),
                "{} vs {} at t = {}",
                implicit,
                explicit,
                t
            );
        }
    }
}

#[test]
fn constant_signal_energy() {
    let values = vec![1.0; 1001];
    let dt = 10.0 / 1000.0;
    assert!((trapezoidal_energy(&values, dt) - 10.0).abs() < 1e-6);
    assert!((simpson_energy(&values, dt) - 10.0).abs() < 1e-6);
    assert_eq!(
        integrate_energy(&values, dt, IntegrationMethod::Simpson),
        simpson_energy(&values, dt)
    );
}

#[test]
fn finite_duration_classification() {
    let result = classify(SignalDurationKind::Finite, 4.0, 0.0);
    assert_eq!(result.label, EnergyClass::FiniteEnergy);
    assert_eq!(result.energy, 4.0);
}

#[test]
fn sine_is_a_power_signal() {
    let options = AnalysisOptions::new()
        .with_interval(-10.0, 10.0)
        .with_sample_count(1000);
    let analysis = analyze_formula("sin(t)", &options).expect("analysis");
    assert_eq!(analysis.label(), EnergyClass::FinitePower);
    assert!((analysis.average_power - 0.5).abs() < 0.05);
    assert_eq!(analysis.classification.energy, f64::INFINITY);
    assert_eq!(analysis.label().to_string(), "Finite average power signal");
}

#[test]
fn unbalanced_parenthesis_is_a_syntax_error() {
    assert!(matches!(
        compile("rect(t"),
        Err(Error::Parse(ParseError::Syntax { .. }))
    ));
    assert!(matches!(
        compile("rect(t))"),
        Err(Error::Parse(ParseError::Syntax { .. }))
    ));
}

#[test]
fn unknown_function_is_named() {
    assert_eq!(
        compile("foo(t)").unwrap_err(),
        Error::Parse(ParseError::UnknownFunction("foo".to_string()))
    );
    assert_eq!(
        compile("foo(t)").unwrap_err().to_string(),
        "Unknown function: foo"
    );
}

#[test]
fn zero_length_interval_is_rejected() {
    let options = AnalysisOptions::new().with_interval(2.0, 2.0);
    assert!(matches!(
        analyze_formula("t", &options),
        Err(Error::Precondition(PreconditionError::EmptyInterval { .. }))
    ));
    assert!(TimeGrid::new(2.0, 2.0, 100).is_err());
    assert!(analyze_all(&Catalog::standard(), IntegrationMethod::Trapezoidal, 2.0, 2.0).is_err());
}

#[test]
fn catalog_batch_view() {
    let report = analyze_all(&Catalog::standard(), IntegrationMethod::Simpson, -10.0, 10.0)
        .expect("batch");
    assert_eq!(report.results.len(), 12);
    assert_eq!(report.results[0].name, "x1(t)");
    assert_eq!(report.results[11].name, "x12(t)");

    for result in &report.results {
        match result.duration {
            SignalDurationKind::Finite => assert_eq!(result.class, EnergyClass::FiniteEnergy),
            SignalDurationKind::Infinite => {
                assert_eq!(result.energy, f64::INFINITY);
                assert_eq!(format_energy(result.energy), "∞");
            },
        }
    }

    // x12 is tri(t) built from ramps: energy 2/3.
    let x12 = report.get("x12(t)").expect("x12");
    assert!((x12.energy - 2.0 / 3.0).abs() < 1e-3);

    let min = report.summary.min_energy.expect("finite energies");
    let max = report.summary.max_energy.expect("finite energies");
    assert!(min <= x12.energy && x12.energy <= max);
}

#[test]
fn cached_program_follows_the_source_text() {
    let mut cache = FormulaCache::new();
    let options = AnalysisOptions::default();

    let first = sigform::signal::analyze_program(
        cache.get_or_compile("exp(-t)*u(t)").expect("compile"),
        &options,
    )
    .expect("analysis");
    let again = sigform::signal::analyze_program(
        cache.get_or_compile("exp(-t)*u(t)").expect("compile"),
        &options,
    )
    .expect("analysis");
    assert_eq!(first.window_energy.to_bits(), again.window_energy.to_bits());

    let edited = cache.get_or_compile("exp(-2t)*u(t)").expect("compile");
    assert_eq!(edited.source(), "exp(-2t)*u(t)");
    assert_eq!(cache.len(), 2);
}

#[test]
fn flat_chains_are_bounded_even_without_a_node_limit() {
    let source = vec!["t"; 200_000].join("+");
    assert!(matches!(
        sigform::formula::compile_with(&source, usize::MAX),
        Err(Error::Parse(ParseError::TooComplex { .. }))
    ));
}

#[test]
fn overflowing_window_is_rejected() {
    let options = AnalysisOptions::new().with_interval(-1e308, 1e308);
    assert!(matches!(
        analyze_formula("1", &options),
        Err(Error::Precondition(PreconditionError::SpanOverflow { .. }))
    ));
}

#[test]
fn decomposition_superposes_on_the_signal_grid() {
    let catalog = Catalog::standard();
    let x7 = catalog.get("x7(t)").expect("x7");
    let samples = sigform::signal::sample_decomposition(x7, &AnalysisOptions::default())
        .expect("sampling")
        .expect("x7 decomposition");

    let last = samples.steps.last().expect("steps");
    assert_eq!(last.values(), samples.original.values());
    for (t, value) in samples.original.iter() {
        let expected = if (0.0..2.0).contains(&t) && t != 0.0 {
            1.0
        } else if t > -2.0 && t < 0.0 {
            -1.0
        } else {
            0.0
        };
        assert_eq!(value, expected, "t = {}", t);
    }
}
