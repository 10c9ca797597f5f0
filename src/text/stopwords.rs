//! Portuguese stop word lists

use std::collections::HashSet;

/// Standard Portuguese stop words
pub const PORTUGUESE: &[&str] = &[
    "a", "à", "ao", "aos", "aquela", "aquelas", "aquele", "aqueles", "aquilo", "as", "às",
    "até", "com", "como", "da", "das", "de", "dela", "delas", "dele", "deles", "depois", "do",
    "dos", "e", "é", "ela", "elas", "ele", "eles", "em", "entre", "era", "eram", "éramos",
    "essa", "essas", "esse", "esses", "esta", "está", "estamos", "estão", "estar", "estas",
    "estava", "estavam", "estávamos", "este", "esteja", "estejam", "estejamos", "estes",
    "esteve", "estive", "estivemos", "estiver", "estivera", "estiveram", "estivéramos",
    "estiverem", "estivermos", "estivesse", "estivessem", "estivéssemos", "estou", "eu", "foi",
    "fomos", "for", "fora", "foram", "fôramos", "forem", "formos", "fosse", "fossem",
    "fôssemos", "fui", "há", "haja", "hajam", "hajamos", "hão", "havemos", "haver", "hei",
    "houve", "houvemos", "houver", "houvera", "houverá", "houveram", "houvéramos", "houverão",
    "houverei", "houverem", "houveremos", "houveria", "houveriam", "houveríamos", "houvermos",
    "houvesse", "houvessem", "houvéssemos", "isso", "isto", "já", "lhe", "lhes", "mais", "mas",
    "me", "mesmo", "meu", "meus", "minha", "minhas", "muito", "na", "não", "nas", "nem", "no",
    "nos", "nós", "nossa", "nossas", "nosso", "nossos", "num", "numa", "o", "os", "ou", "para",
    "pela", "pelas", "pelo", "pelos", "por", "qual", "quando", "que", "quem", "são", "se",
    "seja", "sejam", "sejamos", "sem", "ser", "será", "serão", "serei", "seremos", "seria",
    "seriam", "seríamos", "seu", "seus", "só", "somos", "sou", "sua", "suas", "também", "te",
    "tem", "tém", "têm", "temos", "tenha", "tenham", "tenhamos", "tenho", "terá", "terão",
    "terei", "teremos", "teria", "teriam", "teríamos", "teu", "teus", "teve", "tinha",
    "tinham", "tínhamos", "tive", "tivemos", "tiver", "tivera", "tiveram", "tivéramos",
    "tiverem", "tivermos", "tivesse", "tivessem", "tivéssemos", "tu", "tua", "tuas", "um",
    "uma", "você", "vocês", "vos",
];

/// Conversation-specific additions on top of [`PORTUGUESE`]
pub const DOMAIN: &[&str] = &[
    "me", "minha", "qual", "mais", "foi", "última", "sobre", "pergunta", "contra", "minhas",
    "vez", "vezes",
    // Lemmas of auxiliaries, which the base list only covers in inflected form
    "ser", "estar", "ter", "haver", "ir",
];

/// An owned stop word set
#[derive(Debug, Clone, Default)]
pub struct StopWords {
    words: HashSet<String>,
}

impl StopWords {
    /// Build from any word list; entries are lowercased
    pub fn from_words<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            words: words
                .into_iter()
                .map(|w| w.as_ref().trim().to_lowercase())
                .filter(|w| !w.is_empty())
                .collect(),
        }
    }

    /// The standard Portuguese list
    pub fn portuguese() -> Self {
        Self::from_words(PORTUGUESE.iter().copied())
    }

    /// The standard Portuguese list plus conversation-specific words
    pub fn portuguese_extended() -> Self {
        let mut words = Self::portuguese();
        words.extend(DOMAIN.iter().copied());
        words
    }

    pub fn extend<I, S>(&mut self, words: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.words
            .extend(words.into_iter().map(|w| w.as_ref().trim().to_lowercase()));
    }

    pub fn contains(&self, word: &str) -> bool {
        self.words.contains(word)
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.words.iter().map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_portuguese_contains_common_words() {
        let words = StopWords::portuguese();
        for w in ["de", "que", "não", "você", "estão", "tivéssemos"] {
            assert!(words.contains(w), "missing {w}");
        }
        assert!(!words.contains("ajuda"));
        assert!(!words.contains("vezes"));
    }

    #[test]
    fn test_extended_adds_domain_words() {
        let base = StopWords::portuguese();
        let extended = StopWords::portuguese_extended();
        assert!(extended.len() > base.len());
        for w in ["última", "pergunta", "vezes", "ser", "ter"] {
            assert!(extended.contains(w), "missing {w}");
        }
    }

    #[test]
    fn test_from_words_lowercases_and_skips_blank() {
        let words = StopWords::from_words(["Olá", "  ", "TCHAU "]);
        assert_eq!(words.len(), 2);
        assert!(words.contains("olá"));
        assert!(words.contains("tchau"));
    }
}
