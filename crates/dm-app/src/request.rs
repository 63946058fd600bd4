//! Request schema and its compilation into engine types.

use serde::{Deserialize, Serialize};

use dm_core::{FrequencyPair, Impedance, MatchProblem};
use dm_report::Constraints;
use dm_scan::ScanRange;
use dm_solver::SolverConfig;

use crate::error::AppResult;

/// A complex impedance as it appears in request files.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ImpedanceSpec {
    pub resistance_ohm: f64,
    #[serde(default)]
    pub reactance_ohm: f64,
}

fn default_scan_end() -> f64 {
    180.0
}

fn default_scan_step() -> f64 {
    0.5
}

/// Scan window and resolution, degrees at the f0 reference.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScanSpec {
    #[serde(default)]
    pub start_deg: f64,
    #[serde(default = "default_scan_end")]
    pub end_deg: f64,
    #[serde(default = "default_scan_step")]
    pub step_deg: f64,
}

impl Default for ScanSpec {
    fn default() -> Self {
        Self {
            start_deg: 0.0,
            end_deg: default_scan_end(),
            step_deg: default_scan_step(),
        }
    }
}

fn default_true() -> bool {
    true
}

/// Solver options a caller may override.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OptionsSpec {
    /// Permit the susceptance-canceling auxiliary stub.
    #[serde(default = "default_true")]
    pub allow_balance_stub: bool,
    /// Characteristic impedance of the scanned auxiliary line; defaults to
    /// the source resistance.
    #[serde(default)]
    pub aux_line_z0_ohm: Option<f64>,
}

impl Default for OptionsSpec {
    fn default() -> Self {
        Self {
            allow_balance_stub: true,
            aux_line_z0_ohm: None,
        }
    }
}

/// One complete synthesis request. The shell assembles it, the service
/// consumes it; nothing in it is mutated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchRequest {
    pub source: ImpedanceSpec,
    pub load: ImpedanceSpec,
    /// Optional distinct load at f2 for loads measured per-frequency.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub load_at_f2: Option<ImpedanceSpec>,
    pub f1_hz: f64,
    pub f2_hz: f64,
    #[serde(default)]
    pub scan: ScanSpec,
    #[serde(default)]
    pub constraints: Constraints,
    #[serde(default)]
    pub options: OptionsSpec,
}

impl MatchRequest {
    /// Validate the request and produce the engine inputs. All structural
    /// errors fail here, before any computation starts.
    pub fn compile(&self) -> AppResult<(MatchProblem, ScanRange, SolverConfig)> {
        let source = Impedance::new(self.source.resistance_ohm, self.source.reactance_ohm)?;
        let load_f1 = Impedance::new(self.load.resistance_ohm, self.load.reactance_ohm)?;
        let load_f2 = match &self.load_at_f2 {
            Some(spec) => Impedance::new(spec.resistance_ohm, spec.reactance_ohm)?,
            None => load_f1,
        };
        let freqs = FrequencyPair::from_hz(self.f1_hz, self.f2_hz)?;
        let problem = MatchProblem::with_split_load(source, load_f1, load_f2, freqs)?;

        let range = ScanRange::new(self.scan.start_deg, self.scan.end_deg, self.scan.step_deg)?;

        let config = SolverConfig {
            allow_balance_stub: self.options.allow_balance_stub,
            aux_line_z0_ohm: self.options.aux_line_z0_ohm,
            ..SolverConfig::default()
        };

        Ok((problem, range, config))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppError;

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
            scan: ScanSpec::default(),
            constraints: Constraints::default(),
            options: OptionsSpec::default(),
        }
    }

    #[test]
    fn compiles_reference_request() {
        let (problem, range, config) = reference_request().compile().unwrap();
        assert_eq!(problem.freqs().f1_hz(), 900.0e6);
        assert_eq!(range.step_deg(), 0.5);
        assert!(config.allow_balance_stub);
    }

    #[test]
    fn equal_frequencies_fail_fast() {
        let mut request = reference_request();
        request.f2_hz = request.f1_hz;
        let err = request.compile().unwrap_err();
        assert!(matches!(err, AppError::InvalidInput(_)));
    }

    #[test]
    fn negative_resistance_fails_fast() {
        let mut request = reference_request();
        request.load.resistance_ohm = -5.0;
        let err = request.compile().unwrap_err();
        assert!(matches!(err, AppError::InvalidInput(_)));
    }

    #[test]
    fn non_positive_frequency_fails_fast() {
        let mut request = reference_request();
        request.f1_hz = 0.0;
        assert!(matches!(
            request.compile().unwrap_err(),
            AppError::InvalidInput(_)
        ));
    }

    #[test]
    fn yaml_round_trip_with_defaults() {
        let yaml = "
source: { resistance_ohm: 50.0 }
load: { resistance_ohm: 75.0, reactance_ohm: 25.0 }
f1_hz: 900.0e+6
f2_hz: 1800.0e+6
";
        let request: MatchRequest = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(request.scan.end_deg, 180.0);
        assert_eq!(request.scan.step_deg, 0.5);
        assert!(request.options.allow_balance_stub);
        assert!(request.constraints.max_z_ohm.is_none());
        assert!(request.compile().is_ok());
    }

    #[test]
    fn split_load_is_honored() {
        let mut request = reference_request();
        request.load_at_f2 = Some(ImpedanceSpec {
            resistance_ohm: 60.0,
            reactance_ohm: -10.0,
        });
        let (problem, _, _) = request.compile().unwrap();
        assert_eq!(problem.load_f2().resistance_ohm(), 60.0);
        assert_eq!(problem.load_f1().resistance_ohm(), 75.0);
    }
}
