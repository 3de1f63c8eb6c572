//! Keyword-driven category suggestion for transaction descriptions.
//!
//! Deterministic and total: every description maps to a category name,
//! falling back to the first significant token and finally to "Outros".

/// Keyword buckets scanned in declaration order; first substring hit wins.
const AUTO_CATEGORIES: &[(&str, &[&str])] = &[
    (
        "Alimentação",
        &[
            "mercado", "supermercado", "padaria", "restaurante", "lanchonete",
            "pizzaria", "hamburgueria", "açougue", "hortifruti", "extra",
            "carrefour", "pão de açúcar", "big", "walmart", "ifood", "uber eats",
        ],
    ),
    (
        "Combustível",
        &[
            "posto", "shell", "petrobras", "ipiranga", "ale", "br",
            "combustível", "gasolina", "etanol", "diesel",
        ],
    ),
    (
        "Transporte",
        &[
            "uber", "taxi", "99", "cabify", "ônibus", "metrô", "trem",
            "estacionamento", "pedágio", "vlt", "brt",
        ],
    ),
    (
        "Saúde",
        &[
            "farmácia", "drogaria", "hospital", "clínica", "laboratório",
            "médico", "dentista", "fisioterapeuta", "psicólogo",
        ],
    ),
    (
        "Educação",
        &[
            "escola", "faculdade", "universidade", "curso", "livro",
            "material escolar", "mensalidade",
        ],
    ),
    (
        "Lazer",
        &[
            "cinema", "teatro", "show", "festa", "bar", "balada",
            "viagem", "hotel", "pousada", "turismo",
        ],
    ),
    (
        "Casa e Utilidades",
        &[
            "aluguel", "condomínio", "luz", "energia", "água", "gás",
            "internet", "telefone", "tv", "streaming", "netflix",
        ],
    ),
    (
        "Vestuário",
        &[
            "loja", "roupa", "calçado", "sapato", "tênis", "camisa",
            "calça", "vestido", "shopping",
        ],
    ),
    ("PIX", &["pix", "transferência pix", "pix enviado", "pix recebido"]),
    ("Cartão de Crédito", &["cartão", "crédito", "mastercard", "visa", "elo"]),
    ("Bancos e Taxas", &["banco", "taxa", "tarifa", "anuidade", "juros", "iof"]),
    ("Supermercados", &["supermercado", "mercado", "hiper", "atacado"]),
];

/// Narrow follow-up checks applied after the keyword buckets miss.
const SPECIAL_CASES: &[(&str, &[&str])] = &[
    ("PIX", &["pix"]),
    ("Cartão de Crédito", &["cartão", "mastercard", "visa"]),
    ("Supermercados", &["super", "mercado", "extra", "carrefour"]),
    ("Combustível", &["posto", "combustível", "gasolina"]),
    ("Saúde", &["farmácia", "remédio", "medicamento"]),
    ("Alimentação", &["restaurante", "lanche", "comida"]),
];

/// Tokens skipped when deriving an ad-hoc category from the description.
const IGNORE_WORDS: &[&str] = &[
    "de", "da", "do", "em", "para", "com", "no", "na",
    "compra", "pagamento", "transferência",
];

const FALLBACK_CATEGORY: &str = "Outros";

/// Suggest a category name for a free-text description.
pub fn suggest_category(description: &str) -> String {
    if description.is_empty() {
        return FALLBACK_CATEGORY.to_string();
    }

    let lower = description.to_lowercase();

    for (name, keywords) in AUTO_CATEGORIES {
        if keywords.iter().any(|kw| lower.contains(kw)) {
            return (*name).to_string();
        }
    }

    for (name, words) in SPECIAL_CASES {
        if words.iter().any(|w| lower.contains(w)) {
            return (*name).to_string();
        }
    }

    // No keyword hit: promote the first significant token to a category name
    for word in lower.split_whitespace() {
        if word.chars().count() > 3 && !IGNORE_WORDS.contains(&word) {
            return capitalize(word);
        }
    }

    FALLBACK_CATEGORY.to_string()
}

/// Display color for a known category name, neutral gray otherwise.
pub fn color_for(name: &str) -> &'static str {
    match name {
        "Alimentação" => "#22C55E",
        "Combustível" => "#F59E0B",
        "Transporte" => "#3B82F6",
        "Saúde" => "#EF4444",
        "Educação" => "#8B5CF6",
        "Lazer" => "#EC4899",
        "Casa e Utilidades" => "#06B6D4",
        "Vestuário" => "#F97316",
        "PIX" => "#10B981",
        "Cartão de Crédito" => "#DC2626",
        "Bancos e Taxas" => "#6B7280",
        "Supermercados" => "#16A34A",
        "Outros" => "#9CA3AF",
        _ => "#9CA3AF",
    }
}

/// Icon slug for a known category name.
pub fn icon_for(name: &str) -> &'static str {
    match name {
        "Alimentação" => "utensils",
        "Combustível" => "fuel",
        "Transporte" => "car",
        "Saúde" => "heart",
        "Educação" => "book",
        "Lazer" => "gamepad-2",
        "Casa e Utilidades" => "home",
        "Vestuário" => "shirt",
        "PIX" => "smartphone",
        "Cartão de Crédito" => "credit-card",
        "Bancos e Taxas" => "building",
        "Supermercados" => "shopping-cart",
        _ => "folder",
    }
}

/// Emoji for a known category name.
pub fn emoji_for(name: &str) -> &'static str {
    match name {
        "Alimentação" => "🍽️",
        "Combustível" => "⛽",
        "Transporte" => "🚗",
        "Saúde" => "❤️",
        "Educação" => "📚",
        "Lazer" => "🎮",
        "Casa e Utilidades" => "🏠",
        "Vestuário" => "👕",
        "PIX" => "📱",
        "Cartão de Crédito" => "💳",
        "Bancos e Taxas" => "🏛️",
        "Supermercados" => "🛒",
        _ => "📁",
    }
}

/// Uppercase the first character, lowercase the rest.
fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(|c| c.to_lowercase())).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_description_is_outros() {
        assert_eq!(suggest_category(""), "Outros");
    }

    #[test]
    fn test_keyword_buckets() {
        assert_eq!(suggest_category("COMPRA SUPERMERCADO EXTRA"), "Alimentação");
        assert_eq!(suggest_category("Posto Shell"), "Combustível");
        assert_eq!(suggest_category("PAGAMENTO CONTA LUZ"), "Casa e Utilidades");
        assert_eq!(suggest_category("Uber para o aeroporto"), "Transporte");
        assert_eq!(suggest_category("PIX RECEBIDO CLIENTE"), "PIX");
    }

    #[test]
    fn test_bucket_order_wins_over_later_buckets() {
        // "mercado" appears in both Alimentação and Supermercados; the
        // earlier bucket wins.
        assert_eq!(suggest_category("mercado municipal"), "Alimentação");
    }

    #[test]
    fn test_accented_keywords_match_case_insensitively() {
        assert_eq!(suggest_category("FARMÁCIA SÃO JOÃO"), "Saúde");
        assert_eq!(suggest_category("Anuidade do título"), "Bancos e Taxas");
    }

    #[test]
    fn test_token_fallback_capitalizes_first_significant_word() {
        assert_eq!(suggest_category("zzyzx serviços gerais"), "Zzyzx");
        // Short and ignored tokens are skipped
        assert_eq!(suggest_category("de um jkqx"), "Jkqx");
    }

    #[test]
    fn test_only_insignificant_tokens_is_outros() {
        assert_eq!(suggest_category("de da do em"), "Outros");
        assert_eq!(suggest_category("abc xyz"), "Outros");
    }

    #[test]
    fn test_totality_on_odd_inputs() {
        for input in ["", "   ", "1234567890", "!@#$%", "ação"] {
            assert!(!suggest_category(input).is_empty());
        }
    }

    #[test]
    fn test_style_lookups_have_defaults() {
        assert_eq!(color_for("Alimentação"), "#22C55E");
        assert_eq!(color_for("Inexistente"), "#9CA3AF");
        assert_eq!(icon_for("PIX"), "smartphone");
        assert_eq!(icon_for("Inexistente"), "folder");
        assert_eq!(emoji_for("Combustível"), "⛽");
        assert_eq!(emoji_for("Inexistente"), "📁");
    }
}
