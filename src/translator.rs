//! English → Spanish substitution of cooking vocabulary.
//!
//! Each dictionary entry is applied in turn over the whole text, so a later
//! entry sees the output of every earlier one. `"wheat flour"` for instance is
//! never matched by the built-in dictionary, because `"flour"` comes first and
//! has already been rewritten to `"harina"` by the time it is tried.

use log::warn;
use once_cell::sync::Lazy;
use regex::{NoExpand, Regex};
use std::borrow::Cow;

/// Built-in cooking vocabulary, in application order.
///
/// `"flour"` appears twice; the second definition only overrides the value,
/// the rule keeps the position of the first one.
pub const BUILTIN_TERMS: &[(&str, &str)] = &[
    ("flour", "harina"),
    ("water", "agua"),
    ("salt", "sal"),
    ("sugar", "azúcar"),
    ("olive oil", "aceite de oliva"),
    ("egg", "huevo"),
    ("eggs", "huevos"),
    ("milk", "leche"),
    ("butter", "mantequilla"),
    ("chicken", "pollo"),
    ("beef", "carne de res"),
    ("pork", "cerdo"),
    ("fish", "pescado"),
    ("potato", "papa"),
    ("potatoes", "papas"),
    ("tomato", "tomate"),
    ("tomatoes", "tomates"),
    ("onion", "cebolla"),
    ("onions", "cebollas"),
    ("garlic", "ajo"),
    ("rice", "arroz"),
    ("cheese", "queso"),
    ("minutes", "minutos"),
    ("hour", "hora"),
    ("hours", "horas"),
    ("cook", "cocinar"),
    ("bake", "hornear"),
    ("boil", "hervir"),
    ("fry", "freír"),
    ("stir", "remover"),
    ("mix", "mezclar"),
    ("add", "añadir"),
    ("cut", "cortar"),
    ("chop", "picar"),
    ("slice", "rebanar"),
    ("preheat", "precalentar"),
    ("oven", "horno"),
    ("gluten-free", "sin gluten"),
    ("gluten free", "sin gluten"),
    ("celiac", "celíaco"),
    ("recipe", "receta"),
    ("recipes", "recetas"),
    ("step", "paso"),
    ("steps", "pasos"),
    ("ingredient", "ingrediente"),
    ("ingredients", "ingredientes"),
    ("instruction", "instrucción"),
    ("instructions", "instrucciones"),
    ("serving", "porción"),
    ("servings", "porciones"),
    ("prepare", "preparar"),
    ("preparation", "preparación"),
    ("time", "tiempo"),
    ("ready in", "listo en"),
    ("dinner", "cena"),
    ("lunch", "almuerzo"),
    ("breakfast", "desayuno"),
    ("appetizer", "aperitivo"),
    ("dessert", "postre"),
    ("starter", "entrada"),
    ("main course", "plato principal"),
    ("side dish", "guarnición"),
    ("sauce", "salsa"),
    ("seasoning", "condimento"),
    ("spice", "especia"),
    ("spices", "especias"),
    ("herb", "hierba"),
    ("herbs", "hierbas"),
    ("vegetable", "verdura"),
    ("vegetables", "verduras"),
    ("fruit", "fruta"),
    ("fruits", "frutas"),
    ("meat", "carne"),
    ("pasta", "pasta"),
    ("bread", "pan"),
    ("oil", "aceite"),
    ("vinegar", "vinagre"),
    ("baking powder", "polvo de hornear"),
    ("baking soda", "bicarbonato de sodio"),
    ("flour", "harina"),
    ("wheat flour", "harina de trigo"),
    ("corn flour", "harina de maíz"),
    ("rice flour", "harina de arroz"),
    ("almond flour", "harina de almendra"),
    ("coconut flour", "harina de coco"),
    ("tapioca flour", "harina de tapioca"),
    ("quinoa flour", "harina de quinoa"),
];

static BUILTIN: Lazy<TermDictionary> = Lazy::new(TermDictionary::builtin);

#[derive(Debug, Clone)]
struct TermRule {
    source: String,
    target: String,
    pattern: Regex,
}

/// Immutable mapping of source terms to their replacements.
#[derive(Debug, Clone)]
pub struct TermDictionary {
    rules: Vec<TermRule>,
}

impl TermDictionary {
    pub fn builtin() -> Self {
        Self::from_pairs(BUILTIN_TERMS.iter().copied())
    }

    /// Builds a dictionary from ordered `(source, target)` pairs.
    ///
    /// A repeated source keeps its first position and takes the last target.
    pub fn from_pairs<S, T, I>(pairs: I) -> Self
    where
        S: Into<String>,
        T: Into<String>,
        I: IntoIterator<Item = (S, T)>,
    {
        let mut entries: Vec<(String, String)> = Vec::new();
        for (source, target) in pairs {
            let (source, target) = (source.into(), target.into());
            match entries.iter_mut().find(|(existing, _)| *existing == source) {
                Some(entry) => entry.1 = target,
                None => entries.push((source, target)),
            }
        }

        let rules = entries
            .into_iter()
            .filter_map(|(source, target)| match whole_word_pattern(&source) {
                Ok(pattern) => Some(TermRule {
                    source,
                    target,
                    pattern,
                }),
                Err(e) => {
                    warn!("Skipping term '{}': {}", source, e);
                    None
                }
            })
            .collect();

        Self { rules }
    }

    /// Replaces every whole-word, case-insensitive occurrence of each source
    /// term with its target. Absent or empty input yields an empty string.
    pub fn translate<'a>(&self, text: impl Into<Option<&'a str>>) -> String {
        let text = match text.into() {
            Some(text) if !text.is_empty() => text,
            _ => return String::new(),
        };

        let mut translated = text.to_string();
        for rule in &self.rules {
            let replaced = match rule.pattern.replace_all(&translated, NoExpand(&rule.target)) {
                Cow::Borrowed(_) => continue,
                Cow::Owned(replaced) => replaced,
            };
            translated = replaced;
        }
        translated
    }

    pub fn get(&self, source: &str) -> Option<&str> {
        self.rules
            .iter()
            .find(|rule| rule.source == source)
            .map(|rule| rule.target.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.rules
            .iter()
            .map(|rule| (rule.source.as_str(), rule.target.as_str()))
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

impl Default for TermDictionary {
    fn default() -> Self {
        Self::builtin()
    }
}

// ASCII word boundaries and ASCII-only case folding: accented letters such as
// `é` count as separators, and `K` (Kelvin sign) or `ſ` never match `k` or `s`.
fn whole_word_pattern(source: &str) -> Result<Regex, regex::Error> {
    Regex::new(&format!(r"(?i-u:\b{}\b)", regex::escape(source)))
}

/// Translates `text` with the process-wide built-in dictionary.
pub fn translate<'a>(text: impl Into<Option<&'a str>>) -> String {
    BUILTIN.translate(text)
}

/// The process-wide built-in dictionary.
pub fn builtin_dictionary() -> &'static TermDictionary {
    &BUILTIN
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_and_absent_input() {
        assert_eq!(translate(""), "");
        assert_eq!(translate(None::<&str>), "");
    }

    #[test]
    fn test_text_without_terms_is_untouched() {
        let text = "<p>Nothing to see here, just prose & punctuation!</p>";
        assert_eq!(translate(text), text);
    }

    #[test]
    fn test_case_insensitive_match() {
        assert_eq!(translate("FLOUR"), "harina");
        assert_eq!(translate("flour"), "harina");
        assert_eq!(translate("Flour"), "harina");
    }

    #[test]
    fn test_case_folding_is_ascii_only() {
        assert_eq!(translate("ba\u{212A}e"), "ba\u{212A}e");
        assert_eq!(translate("in\u{17F}tructions"), "in\u{17F}tructions");
        assert_eq!(translate("BAKE instructions"), "hornear instrucciones");
    }

    #[test]
    fn test_no_partial_word_match() {
        assert_eq!(translate("eggplant"), "eggplant");
        assert_eq!(translate("saltwater"), "saltwater");
        assert_eq!(translate("cooked"), "cooked");
    }

    #[test]
    fn test_multi_word_term() {
        assert_eq!(
            translate("baking powder is needed"),
            "polvo de hornear is needed"
        );
    }

    #[test]
    fn test_adjacent_punctuation_does_not_block_match() {
        assert_eq!(translate("flour, (sugar) and salt."), "harina, (azúcar) and sal.");
        assert_eq!(translate("<li>garlic</li>"), "<li>ajo</li>");
    }

    #[test]
    fn test_internal_punctuation_must_match_exactly() {
        assert_eq!(translate("Gluten-Free bread"), "sin gluten pan");
        assert_eq!(translate("gluten_free"), "gluten_free");
    }

    #[test]
    fn test_earlier_rule_shadows_longer_phrase() {
        // "flour" is rewritten before "wheat flour" is ever tried.
        assert_eq!(translate("wheat flour"), "wheat harina");
        // "rice" comes before "rice flour" as well.
        assert_eq!(translate("rice flour"), "arroz harina");
    }

    #[test]
    fn test_longer_phrase_before_its_suffix() {
        assert_eq!(translate("olive oil and oil"), "aceite de oliva and aceite");
    }

    #[test]
    fn test_singular_rule_does_not_touch_plural() {
        assert_eq!(translate("2 eggs"), "2 huevos");
        assert_eq!(translate("1 egg"), "1 huevo");
    }

    #[test]
    fn test_replacement_is_not_case_adapted() {
        assert_eq!(translate("Preheat the OVEN"), "precalentar the horno");
    }

    #[test]
    fn test_duplicate_key_keeps_first_position_and_last_value() {
        let dict = TermDictionary::from_pairs(vec![
            ("flour", "first"),
            ("wheat flour", "harina de trigo"),
            ("flour", "harina"),
        ]);
        assert_eq!(dict.len(), 2);
        assert_eq!(dict.get("flour"), Some("harina"));
        assert_eq!(dict.translate("wheat flour"), "wheat harina");
    }

    #[test]
    fn test_builtin_dictionary_has_unique_keys() {
        let dict = builtin_dictionary();
        assert_eq!(dict.len(), BUILTIN_TERMS.len() - 1);
        assert_eq!(dict.iter().next(), Some(("flour", "harina")));
    }

    #[test]
    fn test_later_rule_rematches_earlier_output() {
        let dict = TermDictionary::from_pairs(vec![("cake", "pan dulce"), ("pan", "sartén")]);
        assert_eq!(dict.translate("cake"), "sartén dulce");
    }

    #[test]
    fn test_not_idempotent_on_adversarial_pair() {
        let dict = TermDictionary::from_pairs(vec![("stock", "broth"), ("broth", "caldo stock")]);
        let once = dict.translate("stock");
        let twice = dict.translate(once.as_str());
        assert_eq!(once, "caldo stock");
        assert_ne!(once, twice);
        assert_eq!(twice, "caldo caldo stock");
    }

    #[test]
    fn test_dollar_in_target_is_literal() {
        let dict = TermDictionary::from_pairs(vec![("price", "$1 each")]);
        assert_eq!(dict.translate("price"), "$1 each");
    }

    #[test]
    fn test_builtin_terms_translate_standalone() {
        // These phrases end in "flour", which is rewritten first.
        let shadowed = [
            "wheat flour",
            "corn flour",
            "rice flour",
            "almond flour",
            "coconut flour",
            "tapioca flour",
            "quinoa flour",
        ];
        let dict = builtin_dictionary();
        for (source, target) in dict.iter().filter(|(s, _)| !shadowed.contains(s)) {
            assert_eq!(dict.translate(source), target, "term '{}'", source);
        }
        for source in shadowed {
            assert_ne!(dict.translate(source), dict.get(source).unwrap());
        }
    }

    #[test]
    fn test_standalone_terms_map_to_their_target() {
        let dict = TermDictionary::from_pairs(vec![
            ("baking soda", "bicarbonato de sodio"),
            ("side dish", "guarnición"),
        ]);
        for (source, target) in dict.iter() {
            assert_eq!(dict.translate(source), target);
        }
    }
}
