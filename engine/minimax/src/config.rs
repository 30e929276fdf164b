//! Search configuration parameters.

use engine_config::SearchSettings;
use tracing::debug;

use crate::evaluator::EvaluationKind;
use crate::search::{Algorithm, SearchError};

/// Configuration for a search agent.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SearchConfig {
    /// Backup rule and pruning behaviour.
    pub algorithm: Algorithm,

    /// Number of rounds to look ahead. One round is one move by every agent,
    /// so a depth of 2 with one adversary searches four plies. Must be >= 1.
    pub depth_limit: u32,

    /// Named evaluator used by [`MultiAgentSearchAgent::from_config`].
    ///
    /// [`MultiAgentSearchAgent::from_config`]: crate::MultiAgentSearchAgent::from_config
    pub evaluation: EvaluationKind,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            algorithm: Algorithm::AlphaBeta,
            depth_limit: 2,
            evaluation: EvaluationKind::Better,
        }
    }
}

impl SearchConfig {
    /// Parse a configuration from its textual names.
    pub fn from_names(algorithm: &str, depth_limit: u32, evaluation: &str) -> Result<Self, SearchError> {
        let config = Self {
            algorithm: algorithm.parse()?,
            depth_limit,
            evaluation: evaluation.parse()?,
        };
        config.validate()?;
        Ok(config)
    }

    /// Load the `[search]` section of the central config.toml.
    ///
    /// File discovery and `STRATAGEM_SEARCH_*` overrides follow
    /// [`engine_config::load_config`]; the resulting names are validated here.
    pub fn load() -> Result<Self, SearchError> {
        let central = engine_config::load_config();
        let config = Self::try_from(&central.search)?;
        debug!(
            algorithm = %config.algorithm,
            depth_limit = config.depth_limit,
            evaluation = %config.evaluation,
            "Loaded search config"
        );
        Ok(config)
    }

    /// Builder pattern: set the algorithm.
    pub fn with_algorithm(mut self, algorithm: Algorithm) -> Self {
        self.algorithm = algorithm;
        self
    }

    /// Builder pattern: set the depth limit in rounds.
    pub fn with_depth(mut self, depth_limit: u32) -> Self {
        self.depth_limit = depth_limit;
        self
    }

    /// Builder pattern: set the evaluation function.
    pub fn with_evaluation(mut self, evaluation: EvaluationKind) -> Self {
        self.evaluation = evaluation;
        self
    }

    pub fn validate(&self) -> Result<(), SearchError> {
        if self.depth_limit < 1 {
            return Err(SearchError::InvalidConfiguration(format!(
                "depth limit must be at least 1, got {}",
                self.depth_limit
            )));
        }
        Ok(())
    }
}

impl TryFrom<&SearchSettings> for SearchConfig {
    type Error = SearchError;

    fn try_from(settings: &SearchSettings) -> Result<Self, Self::Error> {
        Self::from_names(&settings.algorithm, settings.depth, &settings.evaluation)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = SearchConfig::default();
        assert_eq!(config.algorithm, Algorithm::AlphaBeta);
        assert_eq!(config.depth_limit, 2);
        assert_eq!(config.evaluation, EvaluationKind::Better);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_builder_pattern() {
        let config = SearchConfig::default()
            .with_algorithm(Algorithm::Expectimax)
            .with_depth(4)
            .with_evaluation(EvaluationKind::Score);

        assert_eq!(config.algorithm, Algorithm::Expectimax);
        assert_eq!(config.depth_limit, 4);
        assert_eq!(config.evaluation, EvaluationKind::Score);
    }

    #[test]
    fn test_zero_depth_invalid() {
        let config = SearchConfig::default().with_depth(0);
        assert!(matches!(
            config.validate(),
            Err(SearchError::InvalidConfiguration(_))
        ));
    }

    #[test]
    fn test_from_names() {
        let config = SearchConfig::from_names("Minimax", 3, "scoreEvaluationFunction").unwrap();
        assert_eq!(config.algorithm, Algorithm::Minimax);
        assert_eq!(config.depth_limit, 3);
        assert_eq!(config.evaluation, EvaluationKind::Score);

        assert!(SearchConfig::from_names("negamax", 2, "better").is_err());
        assert!(SearchConfig::from_names("minimax", 2, "random").is_err());
        assert!(SearchConfig::from_names("minimax", 0, "better").is_err());
    }

    #[test]
    fn test_from_central_defaults() {
        let settings = SearchSettings::default();
        let config = SearchConfig::try_from(&settings).unwrap();
        assert_eq!(config, SearchConfig::default());
    }

    #[test]
    fn test_load_from_config_file() {
        // The only test in this crate that touches STRATAGEM_* variables
        let path = std::env::temp_dir().join(format!("stratagem-search-{}.toml", std::process::id()));
        std::fs::write(&path, "[search]\nalgorithm = \"minimax\"\ndepth = 3\n").unwrap();
        std::env::set_var("STRATAGEM_CONFIG", &path);

        let loaded = SearchConfig::load();

        std::env::set_var("STRATAGEM_SEARCH_EVALUATION", "negamax-score");
        let rejected = SearchConfig::load();

        std::env::remove_var("STRATAGEM_SEARCH_EVALUATION");
        std::env::remove_var("STRATAGEM_CONFIG");
        std::fs::remove_file(&path).unwrap();

        let loaded = loaded.unwrap();
        assert_eq!(loaded.algorithm, Algorithm::Minimax);
        assert_eq!(loaded.depth_limit, 3);
        assert_eq!(loaded.evaluation, EvaluationKind::Better);
        assert!(matches!(rejected, Err(SearchError::InvalidConfiguration(_))));
    }

    #[test]
    fn test_from_settings_rejects_unknown_algorithm() {
        let settings = SearchSettings {
            algorithm: "mcts".to_string(),
            ..SearchSettings::default()
        };
        assert!(matches!(
            SearchConfig::try_from(&settings),
            Err(SearchError::InvalidConfiguration(_))
        ));
    }
}
