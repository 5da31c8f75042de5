use std::sync::Arc;

use crate::agent::Agent;
use crate::chat::ChatProvider;
use crate::error::DebateError;
use crate::prompts::{ordinal, render, PromptSet};
use crate::roster::{generate_roster, RoleSpec};
use crate::verdict::Verdict;

use super::config::DebateConfig;
use super::pool::PlayerPool;
use super::session::{DebateOutcome, Session};

/// Phase of the debate state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DebateState {
    /// First round: opening statements from persona and turn template
    /// alone
    Opening,
    /// Subsequent rounds: each player rebuts its peers' latest
    /// arguments
    Rebuttal,
    /// The moderator found a consensus answer
    Converged,
    /// Round budget exhausted without consensus; the judge decides
    EscalateToJudge,
    /// Terminal state
    Done,
}

/// Orchestrates one debate session.
///
/// Drives the round loop, collects player arguments, consults the
/// moderator after every round, and escalates to a judge when the
/// round budget is exhausted without consensus.
pub struct Debate {
    config: DebateConfig,
    prompts: PromptSet,
    provider: Arc<dyn ChatProvider>,
    pool: PlayerPool,
    moderator: Agent,
    session: Session,
    state: DebateState,
}

impl Debate {
    /// Builds a debate from an already-generated roster.
    ///
    /// The player count is clamped to the roster size; an empty
    /// roster cannot seat a debate and is rejected.
    pub fn new(
        config: DebateConfig,
        prompts: PromptSet,
        roster: &[RoleSpec],
        provider: Arc<dyn ChatProvider>,
    ) -> Result<Self, DebateError> {
        config.validate()?;
        let pool = PlayerPool::from_roster(roster, config.num_players)?;
        if pool.is_empty() {
            return Err(DebateError::InvalidRequest(
                "empty roster: no players could be initialized".to_string(),
            ));
        }

        let mut moderator = Agent::new("Moderator");
        moderator.set_persona(render(
            &prompts.moderator_meta_prompt,
            &[("debate_topic", &config.topic)],
        ))?;

        Ok(Self {
            config,
            prompts,
            provider,
            pool,
            moderator,
            session: Session::new(),
            state: DebateState::Opening,
        })
    }

    /// Generates a roster for the configured topic, then builds the
    /// debate from it.
    pub async fn bootstrap(
        config: DebateConfig,
        prompts: PromptSet,
        provider: Arc<dyn ChatProvider>,
    ) -> Result<Self, DebateError> {
        config.validate()?;
        let roster = generate_roster(
            provider.as_ref(),
            &prompts,
            &config.topic,
            config.num_players,
        )
        .await?;
        Self::new(config, prompts, &roster, provider)
    }

    /// Current phase of the state machine.
    pub fn state(&self) -> DebateState {
        self.state
    }

    /// The session's progress so far.
    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Number of seated players after any roster clamp.
    pub fn num_players(&self) -> usize {
        self.pool.len()
    }

    /// Announces a message to every player.
    pub fn broadcast(&mut self, msg: &str) {
        self.pool.broadcast(msg);
    }

    /// Relays a player's statement to every other player.
    pub fn speak(&mut self, speaker: &str, msg: &str) {
        self.pool.speak(speaker, msg);
    }

    /// Runs the debate to completion and returns the terminal result.
    ///
    /// Generation failures and malformed moderator or judge replies
    /// abort the session with an error carrying the failing stage; a
    /// judge that breaks its forced-decision contract is reported as
    /// an unsuccessful outcome instead.
    pub async fn run(&mut self) -> Result<DebateOutcome, DebateError> {
        if self.state != DebateState::Opening {
            return Err(DebateError::InvalidRequest(
                "debate has already been run".to_string(),
            ));
        }

        log::info!(
            "debate on '{}': {} players, {} rounds max",
            self.config.topic,
            self.pool.len(),
            self.config.max_rounds
        );

        let mut round = 1;
        log::info!("round 1: opening statements");
        self.play_opening_round().await?;
        let mut verdict = self.consult_moderator(round).await?;

        while !verdict.is_converged() && round < self.config.max_rounds {
            round += 1;
            self.session.round_index = round - 1;
            self.state = DebateState::Rebuttal;
            log::info!("round {round}: rebuttals");
            self.play_rebuttal_round().await?;
            verdict = self.consult_moderator(round).await?;
        }

        let outcome = if verdict.is_converged() {
            self.state = DebateState::Converged;
            log::info!("consensus reached in round {round}");
            self.session.verdict = Some(verdict);
            self.outcome_from_verdict(true)
        } else {
            self.state = DebateState::EscalateToJudge;
            log::info!("round budget exhausted; escalating to judge");
            match self.escalate_to_judge(round).await {
                Ok(forced) => {
                    self.session.verdict = Some(forced);
                    self.outcome_from_verdict(true)
                }
                Err(err @ DebateError::JudgeNonAnswer { .. }) => {
                    log::error!("{err}");
                    DebateOutcome {
                        success: false,
                        debate_answer: String::new(),
                        summary: String::new(),
                        reason: err.to_string(),
                        transcript: self.session.arguments.clone(),
                    }
                }
                Err(err) => return Err(err),
            }
        };

        self.state = DebateState::Done;
        Ok(outcome)
    }

    /// Opening round: each player speaks from persona and turn
    /// template alone, with no peer arguments yet.
    async fn play_opening_round(&mut self) -> Result<(), DebateError> {
        for idx in 0..self.pool.len() {
            let player = &mut self.pool.players_mut()[idx];
            player.prompt_turn(None);
            let answer = player.ask(self.provider.as_ref()).await?;
            player.add_memory(&answer);
            let argument = render(
                &self.prompts.argument,
                &[("player", player.name()), ("answer", &answer)],
            );
            log::debug!("opening argument from '{}'", player.name());
            self.session.arguments.push(argument);
        }
        Ok(())
    }

    /// Rebuttal round: each player sees the tail of the argument log,
    /// which holds its peers' latest arguments and excludes its own.
    async fn play_rebuttal_round(&mut self) -> Result<(), DebateError> {
        let num_players = self.pool.len();
        for idx in 0..num_players {
            let peers = self.session.latest_arguments(num_players - 1);
            let player = &mut self.pool.players_mut()[idx];
            player.prompt_turn(Some(&peers));
            let answer = player.ask(self.provider.as_ref()).await?;
            player.add_memory(&answer);
            let argument = render(
                &self.prompts.argument,
                &[("player", player.name()), ("answer", &answer)],
            );
            log::debug!("rebuttal from '{}'", player.name());
            self.session.arguments.push(argument);
        }
        Ok(())
    }

    /// Presents the round's combined arguments to the moderator and
    /// parses its reply as a verdict. A malformed reply is fatal: the
    /// termination decision depends on it.
    async fn consult_moderator(&mut self, round: usize) -> Result<Verdict, DebateError> {
        let info = self.session.latest_arguments(self.pool.len());
        let prompt = render(
            &self.prompts.moderator_prompt,
            &[("round", &ordinal(round)), ("mod_info", &info)],
        );
        self.moderator.add_event(prompt);
        let reply = self.moderator.ask(self.provider.as_ref()).await?;
        self.moderator.add_memory(&reply);
        Verdict::parse(&reply)
    }

    /// Forced decision: a fresh judge agent extracts answer
    /// candidates from the final round, then must select exactly one.
    async fn escalate_to_judge(&mut self, round: usize) -> Result<Verdict, DebateError> {
        let mut judge = Agent::new("Judge");
        judge.set_persona(render(
            &self.prompts.moderator_meta_prompt,
            &[("debate_topic", &self.config.topic)],
        ))?;

        let info = self.session.latest_arguments(self.pool.len());
        judge.add_event(render(
            &self.prompts.judge_prompt_candidates,
            &[("mod_info", &info)],
        ));
        let candidates = judge.ask(self.provider.as_ref()).await?;
        judge.add_memory(&candidates);

        judge.add_event(self.prompts.judge_prompt_select.clone());
        let decision = judge.ask(self.provider.as_ref()).await?;
        judge.add_memory(&decision);

        let verdict = Verdict::parse(&decision)?;
        if !verdict.is_converged() {
            return Err(DebateError::JudgeNonAnswer { round });
        }
        Ok(verdict)
    }

    fn outcome_from_verdict(&self, success: bool) -> DebateOutcome {
        let verdict = self.session.verdict.clone().unwrap_or_default();
        DebateOutcome {
            success,
            debate_answer: verdict.debate_answer,
            summary: verdict.summary,
            reason: verdict.reason,
            transcript: self.session.arguments.clone(),
        }
    }
}
