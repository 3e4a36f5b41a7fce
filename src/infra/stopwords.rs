// Built-in stopword lists for the default tokenizer.
//
// Short, high-frequency function words only. Both lists are
// lowercase; lookups lowercase the token first.

use std::collections::HashSet;

use crate::domain::language::Language;

const GERMAN: &[&str] = &[
    "aber", "alle", "allem", "allen", "aller", "alles", "als", "also", "am", "an",
    "ander", "andere", "anderen", "auch", "auf", "aus", "bei", "bin", "bis", "bist",
    "da", "damit", "dann", "das", "dass", "dasselbe", "dazu", "dein", "deine", "dem",
    "den", "denn", "der", "des", "dich", "die", "dies", "diese", "diesem", "diesen",
    "dieser", "dieses", "dir", "doch", "dort", "du", "durch", "ein", "eine", "einem",
    "einen", "einer", "eines", "er", "es", "etwas", "euch", "euer", "für", "gegen",
    "hab", "habe", "haben", "hat", "hatte", "hatten", "hier", "hin", "hinter", "ich",
    "ihm", "ihn", "ihnen", "ihr", "ihre", "im", "in", "ist", "jede", "jedem", "jeden",
    "jeder", "jetzt", "kann", "kein", "keine", "können", "man", "manche", "mein",
    "meine", "mich", "mir", "mit", "muss", "nach", "nicht", "nichts", "noch", "nun",
    "nur", "ob", "oder", "ohne", "sehr", "sein", "seine", "sich", "sie", "sind", "so",
    "solche", "soll", "sondern", "um", "und", "uns", "unser", "unter", "viel", "vom",
    "von", "vor", "war", "waren", "warst", "was", "weil", "welche", "wenn", "werde",
    "werden", "wie", "wieder", "will", "wir", "wird", "wo", "zu", "zum", "zur", "zwar",
    "zwischen",
];

const ENGLISH: &[&str] = &[
    "a", "about", "above", "after", "again", "against", "all", "am", "an", "and",
    "any", "are", "as", "at", "be", "because", "been", "before", "being", "below",
    "between", "both", "but", "by", "can", "could", "did", "do", "does", "doing",
    "down", "during", "each", "few", "for", "from", "further", "had", "has", "have",
    "having", "he", "her", "here", "hers", "herself", "him", "himself", "his", "how",
    "i", "if", "in", "into", "is", "it", "its", "itself", "just", "me", "more", "most",
    "my", "myself", "no", "nor", "not", "now", "of", "off", "on", "once", "only", "or",
    "other", "our", "ours", "out", "over", "own", "same", "she", "should", "so", "some",
    "such", "than", "that", "the", "their", "theirs", "them", "then", "there", "these",
    "they", "this", "those", "through", "to", "too", "under", "until", "up", "very",
    "was", "we", "were", "what", "when", "where", "which", "while", "who", "whom",
    "why", "will", "with", "would", "you", "your", "yours",
];

/// Lowercase stopwords for `language`.
pub fn for_language(language: Language) -> HashSet<String> {
    let words = match language {
        Language::German  => GERMAN,
        Language::English => ENGLISH,
    };
    words.iter().map(|w| w.to_string()).collect()
}
