//! Tokenization, part-of-speech tagging and lemmatization
//!
//! Keyword extraction keeps only nouns and verbs in lemma form. The
//! [`LanguageModel`] trait is the seam for that analysis; [`PortugueseModel`]
//! is a self-contained rule-based implementation built from closed-class
//! lexicons, an irregular verb table and suffix rules. Build it once and
//! share it through an `Arc`.

use std::collections::{HashMap, HashSet};

use unicode_normalization::UnicodeNormalization;

use super::stopwords::StopWords;

/// Coarse word classes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PartOfSpeech {
    Noun,
    Verb,
    Auxiliary,
    Adjective,
    Adverb,
    Other,
}

/// One analyzed word
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalyzedToken {
    pub text: String,
    pub lemma: String,
    pub pos: PartOfSpeech,
}

impl AnalyzedToken {
    /// Purely alphabetic surface form
    pub fn is_alpha(&self) -> bool {
        !self.text.is_empty() && self.text.chars().all(char::is_alphabetic)
    }

    /// Nouns and main verbs
    pub fn is_content_word(&self) -> bool {
        matches!(self.pos, PartOfSpeech::Noun | PartOfSpeech::Verb)
    }
}

/// Language analysis used by the keyword pipeline
pub trait LanguageModel: Send + Sync {
    /// Split lowercased text into tokens with lemma and word class
    fn analyze(&self, text: &str) -> Vec<AnalyzedToken>;

    /// Base stop words, used when vectorizing keyword contexts
    fn stopwords(&self) -> &StopWords;

    /// Base plus domain stop words, used when filtering keyword candidates
    fn domain_stopwords(&self) -> &StopWords;

    /// Shorter search key for a lemma whose surface forms rarely contain it
    /// verbatim, such as an infinitive
    fn search_stem(&self, _lemma: &str) -> Option<String> {
        None
    }
}

const CLOSED_CLASS: &[&str] = &[
    // articles and contractions
    "o", "a", "os", "as", "um", "uma", "uns", "umas", "do", "da", "dos", "das", "no", "na",
    "nos", "nas", "ao", "aos", "à", "às", "pelo", "pela", "pelos", "pelas", "num", "numa",
    "dum", "duma", "neste", "nesta", "nesse", "nessa", "naquele", "naquela", "deste", "desta",
    "desse", "dessa", "daquele", "daquela",
    // prepositions
    "de", "em", "por", "para", "pra", "pro", "com", "sem", "sob", "sobre", "entre", "até",
    "desde", "ante", "após", "contra", "perante", "durante", "através",
    // pronouns
    "eu", "tu", "ele", "ela", "nós", "vós", "eles", "elas", "você", "vocês", "me", "te",
    "se", "vos", "lhe", "lhes", "mim", "ti", "si", "comigo", "contigo", "conosco", "meu",
    "minha", "meus", "minhas", "teu", "tua", "teus", "tuas", "seu", "sua", "seus", "suas",
    "nosso", "nossa", "nossos", "nossas", "dele", "dela", "deles", "delas", "este", "esta",
    "estes", "estas", "esse", "essa", "esses", "essas", "aquele", "aquela", "aqueles",
    "aquelas", "isto", "isso", "aquilo", "que", "quem", "qual", "quais", "cujo", "cuja",
    "onde", "quando", "como", "quanto", "quanta", "quantos", "quantas",
    // conjunctions
    "e", "ou", "mas", "porém", "contudo", "todavia", "porque", "pois", "embora", "nem",
    "também", "já", "ainda", "então", "logo", "caso", "enquanto", "conforme",
    // quantifiers and common adverbs
    "muito", "muita", "muitos", "muitas", "pouco", "pouca", "poucos", "poucas", "mais",
    "menos", "tão", "tanto", "tanta", "todo", "toda", "todos", "todas", "nada", "tudo",
    "algo", "alguém", "ninguém", "algum", "alguma", "alguns", "algumas", "nenhum", "nenhuma",
    "outro", "outra", "outros", "outras", "mesmo", "mesma", "cada", "vários", "várias", "só",
    "sempre", "nunca", "aqui", "ali", "lá", "cá", "hoje", "ontem", "amanhã", "agora",
    "depois", "antes", "bem", "mal", "sim", "não", "talvez", "qualquer", "quaisquer",
    "demais", "apenas",
    // numerals
    "dois", "duas", "três", "quatro", "cinco", "seis", "sete", "oito", "nove", "dez",
    "primeiro", "primeira", "segundo", "segunda",
    // interjections and greetings
    "oi", "olá", "obrigado", "obrigada", "tchau", "ok", "okay", "ah", "eh", "oh", "ué",
];

const AUXILIARIES: &[(&str, &[&str])] = &[
    (
        "ser",
        &[
            "ser", "sou", "és", "é", "somos", "sois", "são", "era", "eras", "éramos", "eram",
            "fui", "foi", "fomos", "foram", "fora", "fôramos", "seja", "sejamos", "sejam",
            "fosse", "fôssemos", "fossem", "for", "formos", "forem", "serei", "será",
            "seremos", "serão", "seria", "seríamos", "seriam", "sido", "sendo",
        ],
    ),
    (
        "estar",
        &[
            "estar", "estou", "está", "estás", "estamos", "estão", "estive", "esteve",
            "estivemos", "estiveram", "estava", "estávamos", "estavam", "estivera", "esteja",
            "estejamos", "estejam", "estivesse", "estivessem", "estiver", "estivermos",
            "estiverem", "estando", "estarei", "estará",
        ],
    ),
    (
        "ter",
        &[
            "ter", "tenho", "tens", "tem", "temos", "têm", "tinha", "tínhamos", "tinham", "tive",
            "teve", "tivemos", "tiveram", "tivera", "tenha", "tenhamos", "tenham", "tivesse",
            "tivessem", "tiver", "tiverem", "terei", "terá", "teremos", "terão", "teria",
            "teriam", "tendo", "tido",
        ],
    ),
    (
        "haver",
        &[
            "haver", "hei", "há", "havemos", "hão", "houve", "houvemos", "houveram", "houvera",
            "haja", "hajam", "houvesse", "houver", "haveria", "havia", "haviam", "havendo",
            "havido",
        ],
    ),
    ("ir", &["ir", "vou", "vais", "vai", "vamos", "vão", "ia", "iam", "indo"]),
];

const IRREGULAR_VERBS: &[(&str, &[&str])] = &[
    (
        "querer",
        &[
            "quero", "quer", "queres", "queremos", "querem", "quis", "quisemos", "quiseram",
            "queria", "queriam", "quiser",
        ],
    ),
    ("precisar", &["preciso", "precisa", "precisas", "precisam"]),
    ("fazer", &["faço", "faz", "fazes", "fazem", "fiz", "fez", "fizeram", "fazia", "feito"]),
    ("poder", &["posso", "pode", "podes", "podem", "pude", "pôde", "podia", "podiam"]),
    ("saber", &["sei", "sabe", "sabes", "sabem", "soube", "sabia", "sabiam"]),
    ("dizer", &["digo", "diz", "dizes", "dizem", "disse", "disseram", "dizia", "dito"]),
    ("ver", &["vejo", "vê", "vês", "veem", "vi", "viu", "viram", "via", "visto"]),
    ("vir", &["venho", "vem", "vens", "vêm", "veio", "vieram", "vinha", "vindo"]),
    ("dar", &["dou", "dá", "dás", "dão", "dei", "deu", "deram", "dava", "davam"]),
    ("pôr", &["ponho", "põe", "põem", "pôs", "puseram", "posto"]),
    ("trazer", &["trago", "traz", "trazem", "trouxe", "trouxeram"]),
    ("sentir", &["sinto", "sente", "sentem", "senti", "sentiu"]),
    ("pedir", &["peço", "pede", "pedem", "pedi", "pediu"]),
    ("sair", &["saio", "sai", "saem", "saí", "saiu"]),
    ("achar", &["acho", "acha", "acham"]),
    ("ficar", &["fico", "fica", "ficam"]),
    ("pensar", &["penso", "pensa", "pensam"]),
    ("acreditar", &["acredito", "acredita", "acreditam"]),
    ("tentar", &["tento", "tenta", "tentam"]),
    ("entender", &["entendo", "entende", "entendem"]),
    ("lembrar", &["lembro", "lembra", "lembram"]),
    ("conhecer", &["conheço", "conhece", "conhecem"]),
    ("morar", &["moro", "mora", "moram"]),
    ("sofrer", &["sofro", "sofre", "sofrem"]),
    ("denunciar", &["denuncio", "denuncia", "denunciam"]),
    ("agredir", &["agrido", "agride", "agridem"]),
    ("bater", &["bato", "bate", "batem"]),
    ("procurar", &["procuro", "procura", "procuram"]),
    ("ligar", &["ligo", "liga", "ligam"]),
    ("deixar", &["deixo", "deixa", "deixam"]),
    ("acontecer", &["acontece", "acontecem"]),
];

/// Nouns that look like infinitives
const NOUN_EXCEPTIONS: &[&str] = &[
    "lugar", "celular", "militar", "olhar", "jantar", "altar", "radar", "colar", "pilar",
    "milhar", "azar", "luar", "açúcar", "mulher", "colher", "prazer", "talher", "lazer",
    "elixir",
];

const ADJECTIVES: &[&str] = &[
    "urgente", "urgentes", "necessário", "necessária", "necessários", "necessárias",
    "importante", "importantes", "grande", "grandes", "pequeno", "pequena", "pequenos",
    "pequenas", "bom", "boa", "bons", "boas", "mau", "má", "ruim", "ruins", "novo", "nova",
    "novos", "novas", "velho", "velha", "velhos", "velhas", "melhor", "melhores", "pior",
    "piores", "difícil", "difíceis", "fácil", "fáceis", "possível", "impossível", "certo",
    "certa", "errado", "errada", "triste", "tristes", "feliz", "felizes", "sozinho", "sozinha",
    "cansado", "cansada", "familiar", "similar", "escolar", "particular", "popular", "regular",
    "singular", "polar", "solar", "grave", "graves", "forte", "fortes", "fraco", "fraca",
    "próximo", "próxima", "último", "última", "alto", "alta", "baixo", "baixa",
];

const ADJECTIVE_SUFFIXES: &[&str] = &[
    "oso", "osa", "osos", "osas", "ável", "ível", "áveis", "íveis",
];

/// Rule-based Portuguese tagger and lemmatizer
pub struct PortugueseModel {
    closed_class: HashSet<&'static str>,
    auxiliaries: HashMap<&'static str, &'static str>,
    irregular_verbs: HashMap<&'static str, &'static str>,
    noun_exceptions: HashSet<&'static str>,
    adjectives: HashSet<&'static str>,
    stopwords: StopWords,
    domain_stopwords: StopWords,
}

impl Default for PortugueseModel {
    fn default() -> Self {
        Self::new()
    }
}

impl PortugueseModel {
    pub fn new() -> Self {
        let auxiliaries = AUXILIARIES
            .iter()
            .flat_map(|(lemma, forms)| forms.iter().map(move |form| (*form, *lemma)))
            .collect();
        let irregular_verbs = IRREGULAR_VERBS
            .iter()
            .flat_map(|(lemma, forms)| forms.iter().map(move |form| (*form, *lemma)))
            .collect();

        Self {
            closed_class: CLOSED_CLASS.iter().copied().collect(),
            auxiliaries,
            irregular_verbs,
            noun_exceptions: NOUN_EXCEPTIONS.iter().copied().collect(),
            adjectives: ADJECTIVES.iter().copied().collect(),
            stopwords: StopWords::portuguese(),
            domain_stopwords: StopWords::portuguese_extended(),
        }
    }

    /// Add domain stop words on top of the built-in lists
    pub fn with_extra_stopwords<I, S>(mut self, words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.domain_stopwords.extend(words);
        self
    }

    /// Word class and lemma of one lowercase word
    pub fn tag(&self, word: &str) -> (PartOfSpeech, String) {
        if word.is_empty() || !word.chars().all(char::is_alphabetic) {
            return (PartOfSpeech::Other, word.to_string());
        }
        if self.closed_class.contains(word) {
            return (PartOfSpeech::Other, word.to_string());
        }
        if let Some(lemma) = self.auxiliaries.get(word) {
            return (PartOfSpeech::Auxiliary, (*lemma).to_string());
        }
        if let Some(lemma) = self.irregular_verbs.get(word) {
            return (PartOfSpeech::Verb, (*lemma).to_string());
        }
        if self.noun_exceptions.contains(word) {
            return (PartOfSpeech::Noun, word.to_string());
        }
        if word.chars().count() > 6 && word.ends_with("mente") {
            return (PartOfSpeech::Adverb, word.to_string());
        }
        if self.adjectives.contains(word) {
            return (PartOfSpeech::Adjective, word.to_string());
        }
        if let Some(lemma) = verb_lemma(word) {
            return (PartOfSpeech::Verb, lemma);
        }
        if word.chars().count() > 4 && ADJECTIVE_SUFFIXES.iter().any(|s| word.ends_with(s)) {
            return (PartOfSpeech::Adjective, word.to_string());
        }
        (PartOfSpeech::Noun, singular_noun(word))
    }
}

impl LanguageModel for PortugueseModel {
    fn analyze(&self, text: &str) -> Vec<AnalyzedToken> {
        let lowered: String = text.nfc().collect::<String>().to_lowercase();
        split_words(&lowered)
            .into_iter()
            .map(|word| {
                let (pos, lemma) = self.tag(word);
                AnalyzedToken {
                    text: word.to_string(),
                    lemma,
                    pos,
                }
            })
            .collect()
    }

    fn stopwords(&self) -> &StopWords {
        &self.stopwords
    }

    fn domain_stopwords(&self) -> &StopWords {
        &self.domain_stopwords
    }

    fn search_stem(&self, lemma: &str) -> Option<String> {
        if lemma.chars().count() < 5 || self.noun_exceptions.contains(lemma) {
            return None;
        }
        ["ar", "er", "ir"]
            .iter()
            .find_map(|ending| lemma.strip_suffix(ending))
            .map(str::to_string)
    }
}

/// Alphanumeric runs; everything else separates words
fn split_words(text: &str) -> Vec<&str> {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|w| !w.is_empty())
        .collect()
}

/// Lemma for regular inflections that are unambiguously verbal
fn verb_lemma(word: &str) -> Option<String> {
    let chars = word.chars().count();
    if chars < 4 {
        return None;
    }

    // infinitive
    if ["ar", "er", "ir"].iter().any(|s| word.ends_with(s)) {
        return Some(word.to_string());
    }

    const RULES: &[(&str, &str, usize)] = &[
        // gerund
        ("ando", "ar", 6),
        ("endo", "er", 6),
        ("indo", "ir", 6),
        // 3rd person plural preterite
        ("aram", "ar", 6),
        ("eram", "er", 6),
        ("iram", "ir", 6),
        // 1st person plural
        ("amos", "ar", 6),
        ("emos", "er", 6),
        ("imos", "ir", 6),
        // imperfect of -ar verbs
        ("avam", "ar", 6),
        ("ava", "ar", 6),
        // singular preterite
        ("ei", "ar", 5),
        ("ou", "ar", 5),
        ("eu", "er", 6),
        ("iu", "ir", 5),
    ];

    for (suffix, ending, min_chars) in RULES {
        if chars >= *min_chars {
            if let Some(stem) = word.strip_suffix(suffix) {
                return Some(format!("{stem}{ending}"));
            }
        }
    }
    None
}

/// Plural to singular for nouns
fn singular_noun(word: &str) -> String {
    let chars = word.chars().count();
    if chars <= 3 {
        return word.to_string();
    }

    for (suffix, replacement) in [("ões", "ão"), ("ães", "ão"), ("éis", "el"), ("óis", "ol")] {
        if let Some(stem) = word.strip_suffix(suffix) {
            return format!("{stem}{replacement}");
        }
    }
    if chars > 4 {
        if let Some(stem) = word.strip_suffix("ais") {
            return format!("{stem}al");
        }
    }
    if let Some(stem) = word.strip_suffix("ns") {
        return format!("{stem}m");
    }
    for suffix in ["res", "zes"] {
        if word.ends_with(suffix) {
            if let Some(stem) = word.strip_suffix("es") {
                return stem.to_string();
            }
        }
    }
    if word.ends_with('s') && !["ss", "us", "is"].iter().any(|s| word.ends_with(s)) {
        let mut chars = word.chars().rev();
        chars.next();
        let before = chars.next().unwrap_or('s');
        if !"áéíóúâêô".contains(before) {
            return word[..word.len() - 1].to_string();
        }
    }
    word.to_string()
}
