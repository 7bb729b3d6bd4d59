//! Loading prompt configuration (generation templates) from TOML.
//!
//! See `PromptConfig` and `Prompts` for the expected schema. The templates
//! are the single place where the exercise-list prompt lives; handlers and
//! logic only interpolate values into them.

use serde::Deserialize;
use tracing::{error, info};

/// System instruction for the exercise-list generation call.
const LISTA_SYSTEM_DEFAULT: &str = "Você é um assistente de estudos, sua missão é criar uma lista \
de exercícios baseada em informações fornecidas pelo estudante. Responda APENAS com JSON estrito, \
sem nenhum texto ao redor.";

/// User prompt template. Interpolation points: {materia}, {tema},
/// {quantidade}, {dificuldade}. The embedded JSON document is the worked
/// example the model must imitate; its braces are left untouched by the
/// template filler.
const LISTA_USER_TEMPLATE_DEFAULT: &str = r#"
Gere uma lista de exercícios sobre o tema: {tema} da matéria: {materia}, gere {quantidade} exercícios com nível de dificuldade: {dificuldade}.
Não gere exercícios caso a matéria informada não seja uma matéria educacional de estudo, como as ensinadas nas escolas.
Não gere exercícios caso apareçam temas ou matérias impróprias, como conteúdo sexual explícito, preconceito, ódio, assédio, drogas, cigarro ou ataques de ódio a uma pessoa ou coisa.
Não gere exercícios caso o tema e a matéria não se relacionem entre si, exemplo: história e bhaskara.
Nesses casos o título da lista deverá ser "alerta" e uma mensagem de aviso aparecerá na lista, dizendo para o estudante rever as informações e utilizar a plataforma com respeito e responsabilidade.
A mensagem de aviso, neste caso de "alerta", pode ser colocada no campo "materia" ou como enunciado no primeiro item do array "exercicios".

Cada exercício deve possuir um enunciado em um parágrafo curto e ter 4 alternativas de a até d.
Diversifique as alternativas corretas, para não haver uma sequência grande de mesmas alternativas certas, exemplo: "b, b, b".
Gere as alternativas e forneça o gabarito com as respostas certas dos exercícios no final da lista, apenas o corpo da resposta, sem a letra da alternativa, pois ela já está colocada no front-end.
Certifique-se que o campo "resposta_correta" dentro de cada exercício e o campo "gabarito" global sejam consistentes e se refiram ao texto da alternativa correta.

Devolva no formato JSON de acordo com o modelo de exemplo:
{
  "titulo": "Lista de Bhaskara",
  "materia": "Matemática",
  "tema": "Bhaskara",
  "quantidade": 5,
  "exercicios": [
    {
      "numero": 1,
      "enunciado": "Enunciado do exercício 1",
      "alternativas": ["alternativa_a", "alternativa_b", "alternativa_c", "alternativa_d"],
      "resposta_correta": "alternativa_a"
    },
    {
      "numero": 2,
      "enunciado": "Enunciado do exercício 2",
      "alternativas": ["alternativa_a", "alternativa_b", "alternativa_c", "alternativa_d"],
      "resposta_correta": "alternativa_b"
    },
    {
      "numero": 3,
      "enunciado": "Enunciado do exercício 3",
      "alternativas": ["alternativa_a", "alternativa_b", "alternativa_c", "alternativa_d"],
      "resposta_correta": "alternativa_c"
    },
    {
      "numero": 4,
      "enunciado": "Enunciado do exercício 4",
      "alternativas": ["alternativa_a", "alternativa_b", "alternativa_c", "alternativa_d"],
      "resposta_correta": "alternativa_d"
    },
    {
      "numero": 5,
      "enunciado": "Enunciado do exercício 5",
      "alternativas": ["alternativa_a", "alternativa_b", "alternativa_c", "alternativa_d"],
      "resposta_correta": "alternativa_a"
    }
  ],
  "gabarito": {
    "1": "alternativa_a",
    "2": "alternativa_b",
    "3": "alternativa_c",
    "4": "alternativa_d",
    "5": "alternativa_a"
  }
}
"#;

#[derive(Clone, Debug, Deserialize, Default)]
pub struct PromptConfig {
  #[serde(default)]
  pub prompts: Prompts,
}

/// Prompt templates used by the Gemini client. Defaults reproduce the
/// production exercise-list prompt. Override them in TOML if you need to
/// tune tone or output shape.
#[derive(Clone, Debug, Deserialize)]
pub struct Prompts {
  pub lista_system: String,
  pub lista_user_template: String,
}

impl Default for Prompts {
  fn default() -> Self {
    Self {
      lista_system: LISTA_SYSTEM_DEFAULT.into(),
      lista_user_template: LISTA_USER_TEMPLATE_DEFAULT.into(),
    }
  }
}

/// Attempt to load `PromptConfig` from PROMPT_CONFIG_PATH. On any parsing/IO
/// error, returns None and the compiled-in defaults are used.
pub fn load_prompt_config_from_env() -> Option<PromptConfig> {
  let path = std::env::var("PROMPT_CONFIG_PATH").ok()?;
  match std::fs::read_to_string(&path) {
    Ok(s) => match toml::from_str::<PromptConfig>(&s) {
      Ok(cfg) => {
        info!(target: "estudai_backend", %path, "Loaded prompt config (TOML)");
        Some(cfg)
      }
      Err(e) => {
        error!(target: "estudai_backend", %path, error = %e, "Failed to parse TOML config");
        None
      }
    },
    Err(e) => {
      error!(target: "estudai_backend", %path, error = %e, "Failed to read TOML config file");
      None
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::util::fill_template;

  #[test]
  fn default_template_resolves_all_interpolation_points() {
    let prompts = Prompts::default();
    let user = fill_template(
      &prompts.lista_user_template,
      &[
        ("materia", "Matemática"),
        ("tema", "Bhaskara"),
        ("quantidade", "5"),
        ("dificuldade", "fácil"),
      ],
    );
    assert!(user.contains("tema: Bhaskara"));
    assert!(user.contains("matéria: Matemática"));
    assert!(user.contains("gere 5 exercícios"));
    assert!(user.contains("dificuldade: fácil"));
    assert!(!user.contains("{materia}"));
    assert!(!user.contains("{tema}"));
    assert!(!user.contains("{quantidade}"));
    assert!(!user.contains("{dificuldade}"));
  }

  #[test]
  fn default_template_keeps_generation_rules_and_worked_example() {
    let prompts = Prompts::default();
    let tpl = &prompts.lista_user_template;
    // Refusal sentinel, choice count, answer-key consistency.
    assert!(tpl.contains("\"alerta\""));
    assert!(tpl.contains("4 alternativas"));
    assert!(tpl.contains("resposta_correta"));
    assert!(tpl.contains("gabarito"));
    // The worked example is itself valid JSON once placeholders are gone.
    let start = tpl.find("{\n").expect("worked example present");
    let example = &tpl[start..tpl.rfind('}').unwrap() + 1];
    let doc: serde_json::Value = serde_json::from_str(example).expect("example parses");
    assert_eq!(doc["exercicios"].as_array().unwrap().len(), 5);
    assert_eq!(doc["gabarito"].as_object().unwrap().len(), 5);
  }

  #[test]
  fn toml_override_replaces_defaults() {
    let cfg: PromptConfig = toml::from_str(
      r#"
        [prompts]
        lista_system = "sistema"
        lista_user_template = "tema {tema}"
      "#,
    )
    .unwrap();
    assert_eq!(cfg.prompts.lista_system, "sistema");
    assert_eq!(cfg.prompts.lista_user_template, "tema {tema}");
  }
}
