#![cfg(feature = "serde")]

use genroute::{
    evolution::{EvolutionLauncher, EvolutionOptions, NoopObserver, StopReason},
    oracle::Scene,
    rng::RandomNumberGenerator,
    tour::Tour,
};

#[test]
fn test_run_from_json_configuration() {
    let scene: Scene = serde_json::from_str(
        r#"[
            { "x": 0.0, "y": 0.0 },
            { "x": 0.0, "y": 10.0 },
            { "x": 10.0, "y": 10.0 },
            { "x": 10.0, "y": 0.0 }
        ]"#,
    )
    .unwrap();

    let options: EvolutionOptions = serde_json::from_str(
        r#"{
            "num_points": 4,
            "population_size": 50,
            "num_selected": 5,
            "mutation_rate": 0.1,
            "gene_mutation_rate": 0.1,
            "max_generations": 200,
            "distance_threshold": 40.01,
            "log_level": "None",
            "parallel_threshold": 1000
        }"#,
    )
    .unwrap();

    let mut launcher =
        EvolutionLauncher::new(options, scene, RandomNumberGenerator::from_seed(4)).unwrap();
    let result = launcher.run(&mut NoopObserver).unwrap();
    assert_eq!(result.stop_reason, StopReason::DistanceThreshold);

    let json = serde_json::to_value(&result).unwrap();
    assert_eq!(json["best_distance"], 40.0);
    assert_eq!(json["stop_reason"], "DistanceThreshold");
    assert_eq!(json["best"]["sequence"].as_array().unwrap().len(), 4);
}

#[test]
fn test_scene_json_is_validated() {
    assert!(serde_json::from_str::<Scene>("[]").is_err());
}

#[test]
fn test_tour_json_is_validated() {
    let tour: Tour = serde_json::from_str(r#"{ "sequence": [2, 1, 0], "fitness": 12.5 }"#).unwrap();
    assert_eq!(tour.sequence(), &[2, 1, 0]);
    assert_eq!(tour.fitness(), Some(12.5));

    let unevaluated: Tour =
        serde_json::from_str(r#"{ "sequence": [1, 2, 0], "fitness": null }"#).unwrap();
    assert!(!unevaluated.is_evaluated());

    // Each breaks one tour rule
    for json in [
        r#"{ "sequence": [1, 1, 0], "fitness": null }"#,
        r#"{ "sequence": [0, 2], "fitness": null }"#,
        r#"{ "sequence": [2, 1, 0], "fitness": -5.0 }"#,
    ] {
        assert!(serde_json::from_str::<Tour>(json).is_err(), "{}", json);
    }

    let round_trip: Tour = serde_json::from_str(&serde_json::to_string(&tour).unwrap()).unwrap();
    assert_eq!(round_trip, tour);
}
