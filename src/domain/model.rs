use std::fmt;

/// 一筆生物資料，建立後不可變更
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    pub name: String,
    pub pokedex_number: i32,
    pub type1: String,
    pub type2: String,
    pub classification: String,
    pub height: f64,
    pub weight: f64,
    pub abilities: String,
    pub generation: i32,
    pub legendary_status: String,
}

impl Record {
    /// 次要類型，空字串視為沒有
    pub fn secondary_type(&self) -> Option<&str> {
        if self.type2.is_empty() {
            None
        } else {
            Some(&self.type2)
        }
    }

    /// Case-insensitive substring match against the ability list.
    pub fn has_ability(&self, ability: &str) -> bool {
        self.abilities
            .to_lowercase()
            .contains(&ability.to_lowercase())
    }
}

impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Name: {}", self.name)?;
        writeln!(f, "Pokedex number: {}", self.pokedex_number)?;
        writeln!(f, "Primary type: {}", self.type1)?;
        writeln!(f, "Secondary type: {}", self.secondary_type().unwrap_or("N/A"))?;
        writeln!(f, "Classification: {}", self.classification)?;
        writeln!(f, "Height (m): {}", self.height)?;
        writeln!(f, "Weight (kg): {}", self.weight)?;
        writeln!(f, "Abilities: {}", self.abilities)?;
        writeln!(f, "Generation: {}", self.generation)?;
        write!(f, "Legendary: {}", self.legendary_status)
    }
}


#[cfg(test)]
mod tests {
    use super::fixtures::*;

    #[test]
    fn test_has_ability_ignores_case() {
        let pikachu = pikachu();
        assert!(pikachu.has_ability("Static"));
        assert!(pikachu.has_ability("static"));
        assert!(pikachu.has_ability("LIGHTNING"));
        assert!(pikachu.has_ability(""));
        assert!(!pikachu.has_ability("Blaze"));
    }

    #[test]
    fn test_display_marks_missing_secondary_type() {
        let text = pikachu().to_string();
        assert!(text.contains("Secondary type: N/A"));

        let text = charizard().to_string();
        assert!(text.contains("Secondary type: Flying"));
        assert!(text.ends_with("Legendary: No"));
    }
}
