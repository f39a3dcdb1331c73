use std::sync::Arc;

use super::personas::Persona;
use super::TextGenerator;
use crate::config::GeneratorConfig;

/// Which path produced a reply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplySource {
    Primary { model: String, attempt: u32 },
    Backup { model: String },
    Fallback,
}

#[derive(Debug, Clone)]
pub struct MentorReply {
    pub text: String,
    pub source: ReplySource,
}

/// Turns a mentor name and a user message into reply text. Infallible: every
/// failure ends in a canned apology.
pub struct MentorResponder {
    generator: Arc<dyn TextGenerator>,
    model: String,
    backup_models: Vec<String>,
    max_attempts: u32,
    language: String,
}

impl MentorResponder {
    pub fn new(generator: Arc<dyn TextGenerator>, config: &GeneratorConfig) -> Self {
        Self {
            generator,
            model: config.model.clone(),
            backup_models: config.backup_models.clone(),
            max_attempts: config.max_attempts.max(1),
            language: config.language.clone(),
        }
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn generator(&self) -> &Arc<dyn TextGenerator> {
        &self.generator
    }

    /// Generate a reply from `mentor_name` to `user_message`.
    ///
    /// Unknown names are answered in the default persona's voice, and that
    /// persona's apology is what they get if every attempt fails.
    pub async fn respond(&self, mentor_name: &str, user_message: &str) -> MentorReply {
        let matched = Persona::from_name(mentor_name);
        let persona = matched.unwrap_or(Persona::DEFAULT);
        if matched.is_none() {
            tracing::warn!(mentor = %mentor_name, fallback = %persona, "no persona template for mentor");
        }

        let prompt = persona.build_prompt(user_message, &self.language);

        for attempt in 1..=self.max_attempts {
            tracing::info!(model = %self.model, attempt, persona = %persona, "calling generation service");
            match self.generator.generate(&self.model, &prompt).await {
                Ok(text) => {
                    tracing::info!(model = %self.model, attempt, "generation succeeded");
                    return MentorReply {
                        text,
                        source: ReplySource::Primary {
                            model: self.model.clone(),
                            attempt,
                        },
                    };
                }
                Err(e) => {
                    tracing::warn!(model = %self.model, attempt, error = %e, "generation attempt failed");
                }
            }
        }

        for backup in self.backup_models.iter().filter(|m| **m != self.model) {
            tracing::info!(model = %backup, "switching to backup model");
            match self.generator.generate(backup, &prompt).await {
                Ok(text) => {
                    tracing::info!(model = %backup, "backup model succeeded");
                    return MentorReply {
                        text,
                        source: ReplySource::Backup {
                            model: backup.clone(),
                        },
                    };
                }
                Err(e) => {
                    tracing::warn!(model = %backup, error = %e, "backup model failed");
                }
            }
        }

        tracing::error!(mentor = %mentor_name, "all generation attempts failed, using fallback reply");
        MentorReply {
            text: persona.fallback().to_string(),
            source: ReplySource::Fallback,
        }
    }
}
