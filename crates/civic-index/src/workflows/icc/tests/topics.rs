use super::common::*;
use crate::workflows::icc::topics::{
    seed_topics, to_csv_string, ContributionPolicy, ImpactTable, MatchMode, Suggestion,
    SuggestionConfig, TopicError, TopicIndex, TopicKey,
};

fn fuzzy_config(mode: MatchMode) -> SuggestionConfig {
    SuggestionConfig {
        mode,
        ..SuggestionConfig::default()
    }
}

#[test]
fn keyword_inside_the_query_selects_the_topic() {
    let index = TopicIndex::load(seed_topics(), None);
    let found = index.find("Quero falar sobre reciclagem urbana");

    assert_eq!(
        activities(&found),
        [
            "Projetos de horta escolar",
            "Campanhas de reciclagem",
            "Debates sobre mudanças climáticas",
        ]
    );
    assert!(found
        .iter()
        .all(|suggestion| suggestion.topic == TopicKey::new("meio ambiente")));
}

#[test]
fn topic_name_inside_the_query_selects_the_topic() {
    let index = TopicIndex::load(seed_topics(), None);
    let found = index.find("Projeto de MEIO AMBIENTE na escola");

    assert_eq!(found.len(), 3);
    assert_eq!(found[0].topic.as_str(), "meio ambiente");
}

#[test]
fn matching_topics_are_concatenated_in_key_order() {
    let index = TopicIndex::load(seed_topics(), None);
    let found = index.find("bullying e racismo");

    let topics: Vec<_> = found.iter().map(|s| s.topic.as_str()).collect();
    assert_eq!(
        topics,
        [
            "educação antirracista",
            "educação antirracista",
            "educação antirracista",
            "violência escolar",
            "violência escolar",
            "violência escolar",
        ]
    );
}

#[test]
fn queries_without_matches_return_nothing() {
    let index = TopicIndex::load(seed_topics(), None);

    assert!(index.find("").is_empty());
    assert!(index.find("   ").is_empty());
    assert!(index.find("xyz").is_empty());
}

#[test]
fn contributed_topic_is_found_by_its_keyword() {
    let mut index = TopicIndex::load(seed_topics(), None);
    let outcome = index
        .contribute("novo tema", ["chave"], ["Atividade X"])
        .expect("contribution accepted");

    assert!(outcome.created);
    assert_eq!(outcome.topic, TopicKey::new("novo tema"));
    assert_eq!(activities(&index.find("chave")), ["Atividade X"]);
}

#[test]
fn contributions_append_without_duplicates_by_default() {
    let mut index = TopicIndex::load(seed_topics(), None);
    let outcome = index
        .contribute(
            "  Meio Ambiente ",
            ["Reciclagem", "mutirão"],
            ["Campanhas de reciclagem", "Mutirão de limpeza"],
        )
        .expect("contribution accepted");

    assert!(!outcome.created);
    assert_eq!(outcome.keywords_added, 1);
    assert_eq!(outcome.activities_added, 1);

    let entry = index.get("meio ambiente").expect("topic exists");
    assert_eq!(entry.activities.len(), 4);
    assert_eq!(entry.activities.last().map(String::as_str), Some("Mutirão de limpeza"));
    assert!(entry.keywords.contains("mutirão"));
}

#[test]
fn replace_policy_overwrites_existing_entries() {
    let mut index = TopicIndex::load(seed_topics(), None)
        .with_contribution_policy(ContributionPolicy::Replace);
    index
        .contribute("meio ambiente", ["lixo"], ["Coleta seletiva"])
        .expect("replacement accepted");

    let entry = index.get("meio ambiente").expect("topic exists");
    assert_eq!(entry.activities, ["Coleta seletiva"]);
    assert_eq!(entry.keywords.len(), 1);
    assert!(index.find("reciclagem").is_empty());
}

#[test]
fn empty_contributions_are_rejected() {
    let mut index = TopicIndex::load(seed_topics(), None);

    assert_eq!(
        index.contribute("   ", ["x"], ["y"]),
        Err(TopicError::EmptyTopic)
    );
    assert_eq!(
        index.contribute("novo", [" "], ["", "  "]),
        Err(TopicError::EmptyContribution {
            topic: "novo".to_string()
        })
    );
    assert!(index.get("novo").is_none());
}

#[test]
fn persisted_entries_win_over_seed_entries() {
    let persisted = snapshot(&[
        ("Meio Ambiente", &["lixo"], &["Coleta seletiva"]),
        ("tema salvo", &["salvo"], &["Atividade salva"]),
    ]);
    let index = TopicIndex::load(seed_topics(), Some(persisted.clone()));

    assert_eq!(index.len(), seed_topics().len() + 1);
    assert_eq!(
        index.get("meio ambiente").map(|entry| entry.activities.clone()),
        Some(vec!["Coleta seletiva".to_string()])
    );

    let again = TopicIndex::load(index.snapshot(), Some(persisted));
    assert_eq!(again.snapshot(), index.snapshot());
}

#[test]
fn deduplication_keeps_the_first_occurrence() {
    let bank = snapshot(&[
        ("alpha", &["comum"], &["Roda de conversa", "Mural"]),
        ("beta", &["comum"], &["Roda de conversa", "Podcast"]),
    ]);

    let plain = TopicIndex::load(bank.clone(), None);
    assert_eq!(plain.find("comum").len(), 4);

    let config = SuggestionConfig {
        deduplicate: true,
        ..SuggestionConfig::default()
    };
    let deduplicated = TopicIndex::load_with(bank, None, &config);
    let found = deduplicated.find("comum");
    assert_eq!(activities(&found), ["Roda de conversa", "Mural", "Podcast"]);
    assert_eq!(found[0].topic.as_str(), "alpha");
}

#[test]
fn fuzzy_matching_accepts_at_most_two_topics_per_token() {
    let bank = snapshot(&[
        ("abc", &[], &["Atividade C"]),
        ("abd", &[], &["Atividade D"]),
        ("abe", &[], &["Atividade E"]),
    ]);
    let index = TopicIndex::load_with(bank, None, &fuzzy_config(MatchMode::Fuzzy));

    assert_eq!(activities(&index.find("abc")), ["Atividade C", "Atividade D"]);
}

#[test]
fn fuzzy_matching_tolerates_missing_accents() {
    let bank = snapshot(&[("inclusão", &[], &["Oficinas de Libras"]), ("zzzzzzzz", &[], &["Nada"])]);

    let literal = TopicIndex::load(bank.clone(), None);
    assert!(literal.find("inclusao").is_empty());

    let fuzzy = TopicIndex::load_with(bank, None, &fuzzy_config(MatchMode::Fuzzy));
    assert_eq!(activities(&fuzzy.find("inclusao")), ["Oficinas de Libras"]);
}

#[test]
fn hybrid_matching_unites_both_strategies() {
    let bank = snapshot(&[
        ("meio ambiente", &["reciclagem"], &["Campanhas de reciclagem"]),
        ("inclusão", &[], &["Oficinas de Libras"]),
    ]);
    let index = TopicIndex::load_with(bank, None, &fuzzy_config(MatchMode::Hybrid));

    assert_eq!(
        activities(&index.find("reciclagem inclusao")),
        ["Oficinas de Libras", "Campanhas de reciclagem"]
    );
}

#[test]
fn impact_ranking_orders_highest_first_and_keeps_ties_stable() {
    let table = ImpactTable::standard();
    let topic = TopicKey::new("meio ambiente");
    let suggestion = |activity: &str| Suggestion {
        topic: topic.clone(),
        activity: activity.to_string(),
        impact: None,
    };

    let ranked = table.rank(vec![
        suggestion("Atividade nova"),
        suggestion("Campanhas de reciclagem"),
        suggestion("Projetos de horta escolar"),
        suggestion("Outra atividade"),
        suggestion("Debates sobre mudanças climáticas"),
    ]);

    assert_eq!(
        activities(&ranked),
        [
            "Projetos de horta escolar",
            "Debates sobre mudanças climáticas",
            "Campanhas de reciclagem",
            "Atividade nova",
            "Outra atividade",
        ]
    );
    assert_eq!(ranked[3].impact, Some(0.5));
}

#[test]
fn topic_keys_are_normalized_when_deserialized() {
    let key: TopicKey = serde_json::from_str("\"  Direitos Humanos \"").expect("key");
    assert_eq!(key, TopicKey::new("direitos humanos"));
    assert_eq!(serde_json::to_string(&key).expect("json"), "\"direitos humanos\"");
}

#[test]
fn csv_export_lists_topics_with_joined_columns() {
    let bank = snapshot(&[("tema", &["b", "a"], &["X", "Y"])]);
    let csv = to_csv_string(&bank).expect("csv");
    let lines: Vec<_> = csv.lines().collect();

    assert_eq!(lines, ["topic,keywords,activities", "tema,\"a, b\",X; Y"]);
}

#[test]
fn listing_view_reflects_the_bank() {
    let index = TopicIndex::load(seed_topics(), None);
    let topics = index.topics();

    assert_eq!(topics.len(), 8);
    assert_eq!(topics[0].topic, "cidadania digital");
    assert!(topics.iter().all(|view| !view.activities.is_empty()));
}
