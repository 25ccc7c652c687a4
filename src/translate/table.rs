//! Built-in Portuguese to English label table.
//!
//! A starting vocabulary for common coding-sheet labels. A project's own
//! labels belong in the `[translation]` table of `.codebook.toml`, which
//! extends these entries and wins on conflict. Several source spellings map
//! to one target (missing accents, capitalization drift).

/// RQ1 categories: how the practice is carried out.
pub const RQ1_CATEGORIES: &[(&str, &str)] = &[
    ("Facilitação", "Facilitation"),
    ("Facilitacao", "Facilitation"),
    ("Mediação", "Mediation"),
    ("Mediacao", "Mediation"),
    ("Ferramentas Digitais", "Digital Tools"),
    ("Ferramentas digitais", "Digital Tools"),
    ("Dinâmicas de Grupo", "Group Dynamics"),
    ("Dinâmicas de grupo", "Group Dynamics"),
    ("Técnicas de Ideação", "Ideation Techniques"),
    ("Tecnicas de Ideacao", "Ideation Techniques"),
    ("Colaboração Remota", "Remote Collaboration"),
    ("Colaboração Presencial", "In-Person Collaboration"),
    ("Planejamento da Sessão", "Session Planning"),
    ("Avaliação e Feedback", "Evaluation and Feedback"),
    ("Gamificação", "Gamification"),
];

/// RQ2 categories: challenges reported by the articles.
pub const RQ2_CATEGORIES: &[(&str, &str)] = &[
    ("Desafios de Foco", "Focus Challenges"),
    ("Desafios de foco", "Focus Challenges"),
    ("Desafios de Comunicação", "Communication Challenges"),
    ("Desafios de Comunicacao", "Communication Challenges"),
    ("Desafios Tecnológicos", "Technological Challenges"),
    ("Desafios Tecnologicos", "Technological Challenges"),
    ("Engajamento dos Participantes", "Participant Engagement"),
    ("Gestão do Tempo", "Time Management"),
    ("Gestao do Tempo", "Time Management"),
    ("Sobrecarga Cognitiva", "Cognitive Overload"),
    ("Sobrecarga", "Cognitive Overload"),
    ("Fadiga", "Fatigue"),
    ("Barreiras Culturais", "Cultural Barriers"),
];

pub const SUBCATEGORIES: &[(&str, &str)] = &[
    ("Uso de Quadros Virtuais", "Use of Virtual Whiteboards"),
    ("Votação", "Voting"),
    ("Quebra-gelo", "Icebreakers"),
    ("Quebra-Gelo", "Icebreakers"),
    ("Papel do Facilitador", "Facilitator Role"),
    ("Distrações", "Distractions"),
    ("Distracoes", "Distractions"),
    ("Problemas de Conexão", "Connection Issues"),
    ("Falta de Interação", "Lack of Interaction"),
    ("Regras e Acordos", "Ground Rules"),
];

/// Every built-in entry.
pub fn builtin_entries() -> impl Iterator<Item = (&'static str, &'static str)> {
    RQ1_CATEGORIES
        .iter()
        .chain(RQ2_CATEGORIES)
        .chain(SUBCATEGORIES)
        .copied()
}
