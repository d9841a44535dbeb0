//! Rule-based sentiment classification for chat messages.
//!
//! Text is checked against fixed keyword sets in priority order: urgent
//! (crisis and self-harm language), negative, then positive. The first set
//! with a hit wins and anything else is neutral. Urgent must stay first so that
//! a crisis phrase is escalated even when the same message also contains
//! positive or negative words.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;
use unicode_normalization::UnicodeNormalization;

use crate::models::Sentiment;

const URGENT_KEYWORDS: &[&str] = &[
    "suicídio",
    "suicidio",
    "suicidar",
    "me matar",
    "quero morrer",
    "vontade de morrer",
    "não aguento mais",
    "nao aguento mais",
    "acabar com tudo",
    "acabar com a minha vida",
    "me machucar",
    "me cortar",
    "autolesão",
    "sem saída",
    "não vale a pena viver",
];

const NEGATIVE_KEYWORDS: &[&str] = &[
    "triste",
    "tristeza",
    "ansioso",
    "ansiosa",
    "ansiedade",
    "deprimido",
    "deprimida",
    "depressão",
    "estressado",
    "estressada",
    "estresse",
    "cansado",
    "cansada",
    "esgotado",
    "esgotada",
    "sozinho",
    "sozinha",
    "medo",
    "preocupado",
    "preocupada",
    "angústia",
    "angustiado",
    "angustiada",
    "chorando",
    "insônia",
    "irritado",
    "irritada",
];

const POSITIVE_KEYWORDS: &[&str] = &[
    "feliz",
    "alegre",
    "ótimo",
    "otimo",
    "melhor",
    "obrigado",
    "obrigada",
    "grato",
    "grata",
    "tranquilo",
    "tranquila",
    "animado",
    "animada",
    "estou bem",
    "me sinto bem",
    "aliviado",
    "aliviada",
];

const URGENT_RESPONSES: &[&str] = &[
    "Percebo que você está passando por um momento muito difícil. Você não está sozinho. Ligue agora para o CVV no 188 (24 horas, gratuito) ou procure o pronto-socorro mais próximo.",
    "O que você está sentindo é importante e merece cuidado imediato. Posso acionar um profissional da nossa equipe agora. Se estiver em perigo, ligue 188 (CVV) ou 192 (SAMU).",
    "Obrigado por confiar isso a mim. Sua segurança vem em primeiro lugar: fale agora com o CVV pelo 188 ou peça ajuda a alguém de confiança perto de você.",
];

const NEGATIVE_RESPONSES: &[&str] = &[
    "Sinto muito que você esteja se sentindo assim. Quer me contar um pouco mais sobre o que está acontecendo?",
    "É compreensível se sentir assim em alguns momentos. Já pensou em conversar com um dos nossos psicólogos?",
    "Obrigado por compartilhar. Uma respiração lenta e profunda pode ajudar agora. Posso sugerir alguns exercícios?",
];

const POSITIVE_RESPONSES: &[&str] = &[
    "Que bom saber disso! O que tem contribuído para você se sentir bem?",
    "Fico feliz em ouvir isso. Manter hábitos que fazem bem é uma ótima forma de cuidar da saúde mental.",
    "Excelente! Continue cuidando de você. Estou aqui sempre que precisar.",
];

const NEUTRAL_RESPONSES: &[&str] = &[
    "Entendi. Como você está se sentindo hoje?",
    "Estou aqui para ajudar. Você pode me contar como tem sido a sua semana?",
    "Posso ajudar com agendamentos, informações sobre o programa ou apenas conversar. O que prefere?",
];

const URGENT_SUGGESTIONS: &[&str] = &[
    "Ligar para o CVV (188)",
    "Falar com um profissional agora",
    "Ver serviços de emergência próximos",
];

const NEGATIVE_SUGGESTIONS: &[&str] = &[
    "Agendar consulta com psicólogo",
    "Exercícios de respiração",
    "Técnicas de relaxamento",
];

const POSITIVE_SUGGESTIONS: &[&str] = &[
    "Registrar meu humor",
    "Ver conteúdos de bem-estar",
];

const NEUTRAL_SUGGESTIONS: &[&str] = &[
    "Agendar consulta",
    "Como estou me sentindo",
    "Conhecer o programa",
];

/// Sentiment and its fixed confidence
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SentimentResult {
    /// Winning category
    pub sentiment: Sentiment,
    /// Constant assigned to the category
    pub confidence: f32,
}

/// Fixed confidence for each category.
#[must_use]
pub const fn confidence_for(sentiment: Sentiment) -> f32 {
    match sentiment {
        Sentiment::Urgent => 0.9,
        Sentiment::Negative => 0.8,
        Sentiment::Positive => 0.75,
        Sentiment::Neutral => 0.7,
    }
}

/// Classify free text.
#[must_use]
pub fn classify(text: &str) -> SentimentResult {
    let normalized = text.nfc().collect::<String>().to_lowercase();
    let contains_any = |keywords: &[&str]| keywords.iter().any(|k| normalized.contains(k));

    let sentiment = if contains_any(URGENT_KEYWORDS) {
        Sentiment::Urgent
    } else if contains_any(NEGATIVE_KEYWORDS) {
        Sentiment::Negative
    } else if contains_any(POSITIVE_KEYWORDS) {
        Sentiment::Positive
    } else {
        Sentiment::Neutral
    };

    SentimentResult {
        sentiment,
        confidence: confidence_for(sentiment),
    }
}

/// Canned replies for a sentiment
#[must_use]
pub const fn responses_for(sentiment: Sentiment) -> &'static [&'static str] {
    match sentiment {
        Sentiment::Urgent => URGENT_RESPONSES,
        Sentiment::Negative => NEGATIVE_RESPONSES,
        Sentiment::Positive => POSITIVE_RESPONSES,
        Sentiment::Neutral => NEUTRAL_RESPONSES,
    }
}

/// Suggested follow-up actions for a sentiment
#[must_use]
pub const fn suggestions_for(sentiment: Sentiment) -> &'static [&'static str] {
    match sentiment {
        Sentiment::Urgent => URGENT_SUGGESTIONS,
        Sentiment::Negative => NEGATIVE_SUGGESTIONS,
        Sentiment::Positive => POSITIVE_SUGGESTIONS,
        Sentiment::Neutral => NEUTRAL_SUGGESTIONS,
    }
}

/// Pick one canned reply through `selector`.
pub fn response_for(sentiment: Sentiment, selector: &mut dyn ResponseSelector) -> &'static str {
    let responses = responses_for(sentiment);
    // Out-of-range picks wrap instead of panicking
    let index = selector.select(responses.len()) % responses.len();
    responses[index]
}

/// Chooses which of `len` canned replies to use
#[cfg_attr(test, mockall::automock)]
pub trait ResponseSelector {
    /// Index in `0..len`; `len` is never zero
    fn select(&mut self, len: usize) -> usize;
}

/// Uniformly random choice
#[derive(Debug)]
pub struct RandomSelector {
    rng: StdRng,
}

impl RandomSelector {
    /// Seeded from OS entropy
    #[must_use]
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// Reproducible sequence
    #[must_use]
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Default for RandomSelector {
    fn default() -> Self {
        Self::new()
    }
}

impl ResponseSelector for RandomSelector {
    fn select(&mut self, len: usize) -> usize {
        self.rng.gen_range(0..len)
    }
}

/// Always the same index
#[derive(Debug, Clone, Copy, Default)]
pub struct FixedSelector(pub usize);

impl ResponseSelector for FixedSelector {
    fn select(&mut self, _len: usize) -> usize {
        self.0
    }
}
