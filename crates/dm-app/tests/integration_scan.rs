//! End-to-end synthesis over the full scan domain: 50 ohm source,
//! 75+25j ohm load, 900/1800 MHz, 0.5 degree resolution, 120 ohm
//! impedance ceiling.

use dm_app::{execute, ImpedanceSpec, MatchOutcome, MatchRequest, ScanSpec};
use dm_report::Constraints;

fn reference_request() -> MatchRequest {
    MatchRequest {
        source: ImpedanceSpec {
            resistance_ohm: 50.0,
            reactance_ohm: 0.0,
        },
        load: ImpedanceSpec {
            resistance_ohm: 75.0,
            reactance_ohm: 25.0,
        },
        load_at_f2: None,
        f1_hz: 900.0e6,
        f2_hz: 1800.0e6,
        scan: ScanSpec {
            start_deg: 0.0,
            end_deg: 180.0,
            step_deg: 0.5,
        },
        constraints: Constraints {
            max_z_ohm: Some(120.0),
            ..Constraints::default()
        },
        options: Default::default(),
    }
}

#[test]
fn full_scan_produces_matched_designs() {
    let response = execute(&reference_request()).expect("request should execute");

    let MatchOutcome::Feasible { designs } = response.outcome else {
        panic!("expected feasible designs, got {:?}", response.outcome);
    };
    assert!(!designs.is_empty());

    for design in &designs {
        assert!(
            design.vswr_f1 <= 1.1 && design.vswr_f2 <= 1.1,
            "mismatched design slipped through: VSWR {} / {}",
            design.vswr_f1,
            design.vswr_f2
        );
        assert!(design.max_z0_ohm <= 120.0);
        for segment in &design.segments {
            assert!(segment.z0_ohm > 0.0 && segment.z0_ohm.is_finite());
            assert!((0.0..180.0).contains(&segment.theta_f1_deg));
        }
    }

    assert!(
        designs
            .iter()
            .any(|d| d.scanned_theta_deg > 0.0 && d.scanned_theta_deg < 90.0),
        "no design with scanned length strictly inside (0, 90) degrees"
    );
}

#[test]
fn repeated_execution_is_identical() {
    let request = reference_request();
    let first = execute(&request).unwrap();
    let second = execute(&request).unwrap();
    assert_eq!(first, second);
}

#[test]
fn ranking_is_ascending() {
    let response = execute(&reference_request()).unwrap();
    let MatchOutcome::Feasible { designs } = response.outcome else {
        panic!("expected feasible designs");
    };
    for pair in designs.windows(2) {
        assert!(
            pair[0].max_z0_ohm < pair[1].max_z0_ohm
                || (pair[0].max_z0_ohm == pair[1].max_z0_ohm
                    && pair[0].scanned_theta_deg <= pair[1].scanned_theta_deg)
        );
    }
}

#[test]
fn unmatchable_load_warns_without_failing() {
    // A lossless termination absorbs no power; no network can match it.
    // The request must still succeed, with an aggregated warning instead of
    // a per-sample failure.
    let mut request = reference_request();
    request.load = ImpedanceSpec {
        resistance_ohm: 0.0,
        reactance_ohm: 40.0,
    };
    request.scan = ScanSpec {
        start_deg: 0.0,
        end_deg: 180.0,
        step_deg: 2.0,
    };
    request.constraints = Constraints::default();

    let response = execute(&request).expect("request is structurally valid");
    let MatchOutcome::Feasible { designs } = &response.outcome else {
        panic!("expected an (empty) feasible outcome, not a constraint violation");
    };
    assert!(designs.is_empty());
    assert!(response.warning.is_some(), "aggregated warning expected");

    let d = response.diagnostics;
    assert_eq!(d.no_solution + d.diverged, d.evaluated());
}

#[test]
fn diagnostics_account_for_every_sample() {
    let response = execute(&reference_request()).unwrap();
    let d = response.diagnostics;
    assert_eq!(d.samples, 360);
    assert_eq!(d.skipped_degenerate, 1);
    assert_eq!(d.solved + d.no_solution + d.diverged, d.evaluated());
    assert!(d.solved > 0);
}
