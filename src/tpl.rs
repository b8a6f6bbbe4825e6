use std::collections::HashMap;

/// Template processor for resolving $VARIABLE format variables
pub struct Tpl {
    variables: HashMap<String, String>,
}

impl Tpl {
    pub fn new() -> Self {
        Self {
            variables: HashMap::new(),
        }
    }

    /// Register a variable with its value
    pub fn register<K: Into<String>, V: Into<String>>(&mut self, key: K, value: V) {
        self.variables.insert(key.into(), value.into());
    }

    /// Parse a string and resolve all $VARIABLE references
    ///
    /// Longer names are substituted first so `$HOMEDIR` never gets
    /// clobbered by a shorter `$HOME`.
    pub fn parse(&self, input: &str) -> String {
        let mut keys: Vec<&String> = self.variables.keys().collect();
        keys.sort_by(|a, b| b.len().cmp(&a.len()).then_with(|| a.cmp(b)));

        let mut result = input.to_string();
        for key in keys {
            let pattern = format!("${}", key);
            result = result.replace(&pattern, &self.variables[key]);
        }

        result
    }

    /// Names referenced in `input` that have no registered value
    pub fn unresolved<'a>(&self, input: &'a str, candidates: &[&'a str]) -> Vec<&'a str> {
        candidates
            .iter()
            .copied()
            .filter(|name| !self.variables.contains_key(*name))
            .filter(|name| input.contains(&format!("${}", name)))
            .collect()
    }
}

impl Default for Tpl {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_template_parsing() {
        let mut tpl = Tpl::new();
        tpl.register("HOME", "/home/thoma");
        tpl.register("FOLDER", "woocommerce-binance-pix");

        let result = tpl.parse("$HOME/builds/$FOLDER");
        assert_eq!(result, "/home/thoma/builds/woocommerce-binance-pix");
    }

    #[test]
    fn test_multiple_occurrences() {
        let mut tpl = Tpl::new();
        tpl.register("FOLDER", "plugin");

        let result = tpl.parse("$FOLDER-$FOLDER");
        assert_eq!(result, "plugin-plugin");
    }

    #[test]
    fn test_longest_name_wins() {
        let mut tpl = Tpl::new();
        tpl.register("HOME", "/home/a");
        tpl.register("HOMEDIR", "/srv/b");

        assert_eq!(tpl.parse("$HOMEDIR/x"), "/srv/b/x");
        assert_eq!(tpl.parse("$HOME/x"), "/home/a/x");
    }

    #[test]
    fn test_unresolved() {
        let mut tpl = Tpl::new();
        tpl.register("CWD", "/work");

        let missing = tpl.unresolved("$CWD/$DESKTOP/out", &["CWD", "HOME", "DESKTOP"]);
        assert_eq!(missing, vec!["DESKTOP"]);
    }
}
