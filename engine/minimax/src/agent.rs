//! Search-backed agent for the controlled player.
//!
//! Binds a [`SearchConfig`] to an evaluator and answers one decision per call.
//! Every decision runs on a fresh [`SearchEngine`], so nothing carries over
//! between calls.

use std::fmt;
use std::marker::PhantomData;

use engine_core::{MultiAgentState, PelletFeatures};
use tracing::debug;

use crate::config::SearchConfig;
use crate::evaluator::Evaluator;
use crate::search::{SearchEngine, SearchError, SearchResult};

/// Agent that picks actions by depth-limited adversarial search.
///
/// `E` defaults to a boxed trait object so agents built from configuration
/// share one type regardless of the evaluator chosen.
pub struct MultiAgentSearchAgent<S, E: ?Sized = dyn Evaluator<S>> {
    config: SearchConfig,
    evaluator: Box<E>,
    _state: PhantomData<fn(&S)>,
}

impl<S, E: ?Sized> fmt::Debug for MultiAgentSearchAgent<S, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MultiAgentSearchAgent")
            .field("algorithm", &self.config.algorithm)
            .field("depth_limit", &self.config.depth_limit)
            .field("evaluation", &self.config.evaluation)
            .finish()
    }
}

impl<S, E> MultiAgentSearchAgent<S, E>
where
    S: MultiAgentState,
    E: Evaluator<S>,
{
    /// Create an agent with an explicit evaluator.
    ///
    /// `config.evaluation` is ignored; the given evaluator is used instead.
    pub fn new(config: SearchConfig, evaluator: E) -> Result<Self, SearchError> {
        config.validate()?;
        Ok(Self {
            config,
            evaluator: Box::new(evaluator),
            _state: PhantomData,
        })
    }
}

impl<S> MultiAgentSearchAgent<S>
where
    S: PelletFeatures + 'static,
{
    /// Create an agent using the evaluator named by `config.evaluation`.
    pub fn from_config(config: SearchConfig) -> Result<Self, SearchError> {
        config.validate()?;
        debug!(
            algorithm = %config.algorithm,
            depth_limit = config.depth_limit,
            evaluation = %config.evaluation,
            "Creating search agent"
        );
        Ok(Self {
            evaluator: config.evaluation.resolve(),
            config,
            _state: PhantomData,
        })
    }
}

impl<S> MultiAgentSearchAgent<S>
where
    S: MultiAgentState + 'static,
{
    /// Like [`from_config`](MultiAgentSearchAgent::from_config) for states that
    /// expose no pellet features. Fails if the configured evaluator needs them.
    pub fn from_config_without_features(config: SearchConfig) -> Result<Self, SearchError> {
        config.validate()?;
        Ok(Self {
            evaluator: config.evaluation.resolve_without_features()?,
            config,
            _state: PhantomData,
        })
    }
}

impl<S, E> MultiAgentSearchAgent<S, E>
where
    S: MultiAgentState,
    E: Evaluator<S> + ?Sized,
{
    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// Run one full decision from `state`.
    pub fn search(&self, state: &S) -> Result<SearchResult<S::Action>, SearchError> {
        let mut engine =
            SearchEngine::new(self.config.algorithm, self.config.depth_limit, &*self.evaluator)?;
        engine.run(state)
    }

    /// Best action for the controlled agent, `None` when `state` is terminal.
    pub fn get_action(&self, state: &S) -> Result<Option<S::Action>, SearchError> {
        Ok(self.search(state)?.action)
    }
}
