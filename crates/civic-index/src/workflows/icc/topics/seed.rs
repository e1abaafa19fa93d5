use super::domain::{TopicEntry, TopicKey, TopicSnapshot};

const SEED: &[(&str, &[&str], &[&str])] = &[
    (
        "educação antirracista",
        &[
            "racismo",
            "racial",
            "etnia",
            "afro",
            "discriminação",
            "negritude",
            "antirracista",
        ],
        &[
            "Roda de conversa sobre identidade racial",
            "Produção de murais sobre igualdade étnico-racial",
            "Análise de livros com protagonistas negros",
        ],
    ),
    (
        "inclusão e acessibilidade",
        &[
            "inclusão",
            "acessível",
            "acessibilidade",
            "deficiência",
            "libras",
            "diversidade funcional",
        ],
        &[
            "Simulações de acessibilidade",
            "Oficinas de Libras",
            "Discussão sobre barreiras físicas e sociais",
        ],
    ),
    (
        "direitos humanos",
        &["direitos", "igualdade", "justiça social", "direitos civis"],
        &[
            "Debate sobre a Declaração Universal dos Direitos Humanos",
            "Estudo de casos de violação de direitos",
            "Criação de campanhas de conscientização",
        ],
    ),
    (
        "educação sexual",
        &["sexualidade", "gênero", "puberdade", "prevenção"],
        &[
            "Roda de conversa sobre consentimento",
            "Oficina sobre saúde sexual",
            "Debate sobre gênero e respeito",
        ],
    ),
    (
        "meio ambiente",
        &[
            "reciclagem",
            "sustentabilidade",
            "mudanças climáticas",
            "ecologia",
            "horta",
        ],
        &[
            "Projetos de horta escolar",
            "Campanhas de reciclagem",
            "Debates sobre mudanças climáticas",
        ],
    ),
    (
        "violência escolar",
        &["bullying", "agressão", "conflito", "violência"],
        &[
            "Círculos de construção de paz",
            "Teatro do oprimido",
            "Mediação de conflitos",
        ],
    ),
    (
        "cidadania digital",
        &["redes sociais", "fake news", "internet", "privacidade"],
        &[
            "Análise de fake news",
            "Oficina sobre segurança online",
            "Campanha contra cyberbullying",
        ],
    ),
    (
        "diversidade cultural",
        &["multicultural", "tradições", "folclore", "identidades culturais"],
        &[
            "Feira de culturas",
            "Exposição sobre identidades culturais",
            "Pesquisa de tradições familiares",
        ],
    ),
];

/// Built-in topic bank loaded before any persisted contributions.
pub fn seed_topics() -> TopicSnapshot {
    SEED.iter()
        .map(|(topic, keywords, activities)| {
            (
                TopicKey::new(topic),
                TopicEntry::new(keywords.iter(), activities.iter()),
            )
        })
        .collect()
}
