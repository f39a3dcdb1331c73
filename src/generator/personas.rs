//! The four hardcoded mentor personas and their prompt templates.

/// A mentor persona known to the prompt builder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Persona {
    Anna,
    Marek,
    Kasia,
    David,
}

impl Persona {
    pub const ALL: [Persona; 4] = [Self::Anna, Self::Marek, Self::Kasia, Self::David];

    /// Persona used for prompts when a mentor name matches none of the templates.
    pub const DEFAULT: Persona = Self::Anna;

    /// Exact, case-sensitive match on the mentor display name.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|p| p.name() == name)
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Anna => "Anna",
            Self::Marek => "Marek",
            Self::Kasia => "Kasia",
            Self::David => "David",
        }
    }

    /// Role description that opens the prompt.
    pub fn prompt_prefix(&self) -> &'static str {
        match self {
            Self::Anna => {
                "You are Anna, a psychologist and expert in personal development.\n\
                 You are warm and supportive and help people grow. You give concrete psychological advice."
            }
            Self::Marek => {
                "You are Marek, a personal trainer and fitness expert.\n\
                 You are concrete, practical, and focused on results. You give training and nutrition advice."
            }
            Self::Kasia => {
                "You are Kasia, a business coach and productivity expert.\n\
                 You are energetic, motivating, and success-oriented. You help with business and productivity."
            }
            Self::David => {
                "You are David, a mental coach in the style of David Goggins.\n\
                 You are direct, demanding, and accept no excuses. You motivate through challenges."
            }
        }
    }

    pub fn style(&self) -> &'static str {
        match self {
            Self::Anna => "warm psychologist",
            Self::Marek => "concrete trainer",
            Self::Kasia => "energetic coach",
            Self::David => "tough motivator",
        }
    }

    /// Canned reply for when the generation service cannot be reached.
    pub fn fallback(&self) -> &'static str {
        match self {
            Self::Anna => {
                "Sorry about the technical problems. Try asking again - I'm here to help you with your personal growth."
            }
            Self::Marek => {
                "I'm having connection problems. Try again in a moment - I'm happy to help with your training and diet."
            }
            Self::Kasia => {
                "Temporary technical problems. Refresh the page and try again - I'm ready to talk business!"
            }
            Self::David => {
                "The system is having problems, but that's no reason to quit. Try again - together we'll break every barrier!"
            }
        }
    }

    /// Build the single-turn prompt for `user_message`. Prior turns are never
    /// included.
    pub fn build_prompt(&self, user_message: &str, language: &str) -> String {
        let name = self.name();
        format!(
            "[MENTOR: {name}]\n\
             {prefix}\n\
             \n\
             CURRENT QUESTION: \"{user_message}\"\n\
             \n\
             INSTRUCTIONS:\n\
             1. Answer as {name}, in your style ({style})\n\
             2. Focus only on this question (ignore any history)\n\
             3. At most 3-4 sentences\n\
             4. Answer in {language}, concretely and helpfully\n\
             \n\
             {name}:",
            prefix = self.prompt_prefix(),
            style = self.style(),
        )
    }
}

impl std::fmt::Display for Persona {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
