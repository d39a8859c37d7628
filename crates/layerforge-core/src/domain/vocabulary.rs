//! PT/EN concept vocabulary.
//!
//! Maps normalized Portuguese and English words to an English concept. The
//! classifier uses the concepts as extracted features; the naming analyzer
//! uses them (plus generic long words) as name building blocks.

use crate::domain::{registry::LAYER_REGISTRY, text};

/// Normalized word → English concept.
pub static CONCEPTS: &[(&str, &str)] = &[
    ("botao", "button"),
    ("button", "button"),
    ("icone", "icon"),
    ("icon", "icon"),
    ("tela", "screen"),
    ("screen", "screen"),
    ("pagina", "page"),
    ("page", "page"),
    ("deposito", "deposit"),
    ("deposit", "deposit"),
    ("saque", "withdrawal"),
    ("withdrawal", "withdrawal"),
    ("transferencia", "transfer"),
    ("transfer", "transfer"),
    ("carteira", "wallet"),
    ("wallet", "wallet"),
    ("confirmacao", "confirmation"),
    ("confirmation", "confirmation"),
    ("modal", "modal"),
    ("usuario", "user"),
    ("user", "user"),
    ("perfil", "profile"),
    ("profile", "profile"),
    ("lista", "list"),
    ("list", "list"),
    ("cartao", "card"),
    ("card", "card"),
    ("formulario", "form"),
    ("form", "form"),
    ("pagamento", "payment"),
    ("payment", "payment"),
    ("saldo", "balance"),
    ("balance", "balance"),
    ("busca", "search"),
    ("pesquisa", "search"),
    ("search", "search"),
    ("produto", "product"),
    ("product", "product"),
    ("pedido", "order"),
    ("order", "order"),
    ("transacao", "transaction"),
    ("transaction", "transaction"),
    ("extrato", "statement"),
    ("statement", "statement"),
    ("login", "login"),
    ("cadastro", "signup"),
    ("signup", "signup"),
    ("senha", "password"),
    ("password", "password"),
    ("endereco", "address"),
    ("address", "address"),
    ("cabecalho", "header"),
    ("header", "header"),
    ("rodape", "footer"),
    ("footer", "footer"),
    ("menu", "menu"),
    ("navegacao", "navigation"),
    ("navigation", "navigation"),
    ("notificacao", "notification"),
    ("notification", "notification"),
    ("mensagem", "message"),
    ("message", "message"),
    ("imagem", "image"),
    ("image", "image"),
    ("avatar", "avatar"),
    ("moeda", "currency"),
    ("currency", "currency"),
    ("valor", "amount"),
    ("amount", "amount"),
    ("preco", "price"),
    ("price", "price"),
    ("carrinho", "cart"),
    ("cart", "cart"),
    ("tema", "theme"),
    ("theme", "theme"),
    ("entrada", "input"),
    ("input", "input"),
    ("texto", "text"),
    ("text", "text"),
    ("titulo", "title"),
    ("title", "title"),
    ("rotulo", "label"),
    ("label", "label"),
    ("filtro", "filter"),
    ("filter", "filter"),
    ("tabela", "table"),
    ("table", "table"),
    ("grafico", "chart"),
    ("chart", "chart"),
    ("conta", "account"),
    ("account", "account"),
    ("cliente", "customer"),
    ("customer", "customer"),
    ("documento", "document"),
    ("document", "document"),
    ("configuracao", "settings"),
    ("configuracoes", "settings"),
    ("settings", "settings"),
    ("historico", "history"),
    ("history", "history"),
    ("favorito", "favorite"),
    ("favorite", "favorite"),
    ("calendario", "calendar"),
    ("calendar", "calendar"),
    ("dialogo", "dialog"),
    ("dialog", "dialog"),
    ("alerta", "alert"),
    ("alert", "alert"),
    ("progresso", "progress"),
    ("progress", "progress"),
    ("date", "date"),
    ("email", "email"),
    ("nome", "name"),
    ("name", "name"),
];

/// Words never used as name concepts.
pub static STOP_WORDS: &[&str] = &[
    "simples", "simple", "basico", "basic", "complexo", "complex", "completo", "complete",
    "pequeno", "small", "grande", "large", "reutilizavel", "reusable", "componente", "component",
    "camada", "layer", "sobre", "entre", "quando", "onde", "todos", "todas", "cada", "muito",
    "outro", "outra", "outros", "deve", "devem", "precisa", "usando", "using", "which", "where",
    "should", "their", "there", "these", "those", "about", "with", "without", "mostra",
    "mostrar", "exibe", "exibir", "display", "shows", "permite", "allows", "para", "contendo",
    "containing", "possui", "having", "aparece", "dentro", "inside", "avancado", "advanced",
    "multiplos", "multiple", "composto", "composed", "listar", "buscar", "criar", "cadastrar",
    "atualizar", "editar", "remover", "excluir", "deletar", "formatar", "validar", "calcular",
    "converter", "carregar", "enviar", "salvar",
];

/// Minimum length of an unknown word to be kept as a concept.
pub const MIN_CONCEPT_LEN: usize = 5;

/// Look up the concept for a single normalized word.
pub fn concept_of(word: &str) -> Option<&'static str> {
    CONCEPTS.iter().find(|(w, _)| *w == word).map(|(_, c)| *c)
}

pub fn is_stop_word(word: &str) -> bool {
    STOP_WORDS.contains(&word)
}

fn is_layer_keyword(word: &str) -> bool {
    LAYER_REGISTRY
        .iter()
        .any(|def| def.pattern.keywords.contains(&word))
}

/// Dictionary concepts found in the normalized text, in order of appearance.
pub fn extract_features(normalized: &str) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    for word in text::tokens(normalized) {
        if let Some(concept) = concept_of(word) {
            if !out.iter().any(|c| c == concept) {
                out.push(concept.to_string());
            }
        }
    }
    out
}

/// Dictionary concepts plus generic long words, in order of appearance.
/// Stop words and bare layer keywords (`gateway`, `entidade`) are skipped.
pub fn extract_concepts(normalized: &str) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    for word in text::tokens(normalized) {
        let concept = match concept_of(word) {
            Some(c) => c.to_string(),
            None if word.chars().count() >= MIN_CONCEPT_LEN
                && !is_stop_word(word)
                && !is_layer_keyword(word)
                && word.chars().all(|c| c.is_ascii_alphanumeric())
                && !word.chars().all(|c| c.is_ascii_digit()) =>
            {
                word.to_string()
            }
            None => continue,
        };
        if !out.contains(&concept) {
            out.push(concept);
        }
    }
    out
}

/// Parse a comma-separated concept list (AI provider response).
pub fn parse_concept_list(raw: &str) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    for part in raw.split([',', '\n']) {
        let concept = text::to_kebab_case(&text::normalize(part));
        if concept.is_empty() || out.contains(&concept) {
            continue;
        }
        out.push(concept);
    }
    out
}
