//! Config tests.

use crate::config::{BotConfig, ChunkStrategy, LibraryConfig, DEFAULT_EMPTY_ANSWER_MESSAGE};
use serial_test::serial;
use std::env;
use std::path::PathBuf;

const ENV_KEYS: &[&str] = &[
    "BOT_TOKEN",
    "TELEGRAM_BOT_TOKEN",
    "TELEGRAM_API_URL",
    "TELOXIDE_API_URL",
    "LOG_FILE",
    "INTERACTION_LOG_FILE",
    "OPENAI_API_KEY",
    "OPENAI_BASE_URL",
    "MODEL",
    "LLM_SYSTEM_PROMPT",
    "SYSTEM_PROMPT",
    "LLM_MAX_TOKENS",
    "REFERENCE_DATA_PATH",
    "CHUNK_BUDGET",
    "CHUNK_STRATEGY",
    "EMPTY_ANSWER_MESSAGE",
];

fn reset_env() {
    for key in ENV_KEYS {
        env::remove_var(key);
    }
}

fn reference_file() -> tempfile::NamedTempFile {
    let file = tempfile::NamedTempFile::new().unwrap();
    std::fs::write(file.path(), "library: RUDN\n").unwrap();
    file
}

#[test]
#[serial]
fn test_load_config_with_defaults() {
    reset_env();
    env::set_var("BOT_TOKEN", "test_token");
    env::set_var("OPENAI_API_KEY", "test_key");

    let config = BotConfig::load(None).unwrap();

    assert_eq!(config.bot_token(), "test_token");
    assert!(config.telegram_api_url().is_none());
    assert_eq!(config.log_file(), "logs/library-bot.log");
    assert_eq!(config.interaction_log_file(), "conversation.log");
    assert_eq!(config.llm.llm_model, "gpt-3.5-turbo-0125");
    assert_eq!(config.llm.llm_max_tokens, 200);
    assert_eq!(config.library().reference_path, PathBuf::from("data.yaml"));
    assert_eq!(config.library().chunk_budget, 200);
    assert_eq!(config.library().chunk_strategy, ChunkStrategy::Chars);
    assert_eq!(config.library().empty_answer_message, DEFAULT_EMPTY_ANSWER_MESSAGE);
    reset_env();
}

#[test]
#[serial]
fn test_load_config_with_custom_values() {
    reset_env();
    env::set_var("TELEGRAM_BOT_TOKEN", "legacy_token");
    env::set_var("OPENAI_API_KEY", "custom_key");
    env::set_var("LOG_FILE", "/tmp/bot.log");
    env::set_var("INTERACTION_LOG_FILE", "/tmp/conversation.log");
    env::set_var("REFERENCE_DATA_PATH", "/srv/library/data.yaml");
    env::set_var("CHUNK_BUDGET", "120");
    env::set_var("CHUNK_STRATEGY", "tokens");
    env::set_var("EMPTY_ANSWER_MESSAGE", "No answer.");

    let config = BotConfig::load(None).unwrap();

    assert_eq!(config.bot_token(), "legacy_token");
    assert_eq!(config.log_file(), "/tmp/bot.log");
    assert_eq!(config.interaction_log_file(), "/tmp/conversation.log");
    assert_eq!(config.library().reference_path, PathBuf::from("/srv/library/data.yaml"));
    assert_eq!(config.library().chunk_budget, 120);
    assert_eq!(config.library().chunk_strategy, ChunkStrategy::Tokens);
    assert_eq!(config.library().empty_answer_message, "No answer.");
    reset_env();
}

#[test]
#[serial]
fn test_load_config_with_override_token() {
    reset_env();
    env::set_var("BOT_TOKEN", "env_token");
    env::set_var("OPENAI_API_KEY", "test_key");

    let config = BotConfig::load(Some("override_token".to_string())).unwrap();

    assert_eq!(config.bot_token(), "override_token");
    reset_env();
}

#[test]
#[serial]
fn test_load_config_missing_token_fails() {
    reset_env();
    env::set_var("OPENAI_API_KEY", "test_key");
    assert!(BotConfig::load(None).is_err());
    reset_env();
}

#[test]
#[serial]
fn test_load_config_rejects_bad_chunk_settings() {
    reset_env();
    env::set_var("BOT_TOKEN", "test_token");
    env::set_var("OPENAI_API_KEY", "test_key");

    env::set_var("CHUNK_BUDGET", "-5");
    let err = BotConfig::load(None).unwrap_err();
    assert_eq!(err.to_string(), "CHUNK_BUDGET is not an integer: -5");
    env::remove_var("CHUNK_BUDGET");

    env::set_var("CHUNK_STRATEGY", "sentences");
    assert!(BotConfig::load(None).is_err());
    reset_env();
}

#[test]
#[serial]
fn test_validate_accepts_complete_config() {
    reset_env();
    let reference = reference_file();
    env::set_var("BOT_TOKEN", "test_token");
    env::set_var("OPENAI_API_KEY", "test_key");
    env::set_var("REFERENCE_DATA_PATH", reference.path());

    let config = BotConfig::load(None).unwrap();
    assert!(config.validate().is_ok());
    reset_env();
}

#[test]
#[serial]
fn test_validate_telegram_api_url_invalid() {
    reset_env();
    let reference = reference_file();
    env::set_var("BOT_TOKEN", "test_token");
    env::set_var("OPENAI_API_KEY", "test_key");
    env::set_var("REFERENCE_DATA_PATH", reference.path());
    env::set_var("TELEGRAM_API_URL", "not-a-valid-url");

    let config = BotConfig::load(None).unwrap();
    assert!(config.validate().is_err());
    reset_env();
}

#[test]
#[serial]
fn test_validate_missing_reference_file() {
    reset_env();
    env::set_var("BOT_TOKEN", "test_token");
    env::set_var("OPENAI_API_KEY", "test_key");
    env::set_var("REFERENCE_DATA_PATH", "/nonexistent/data.yaml");

    let config = BotConfig::load(None).unwrap();
    assert!(config.validate().is_err());
    reset_env();
}

#[test]
fn test_validate_zero_budget() {
    let reference = reference_file();
    let config = LibraryConfig {
        reference_path: reference.path().to_path_buf(),
        chunk_budget: 0,
        ..LibraryConfig::default()
    };
    assert!(config.validate().is_err());
}

#[test]
fn test_chunk_strategy_parse_and_display() {
    assert_eq!("chars".parse::<ChunkStrategy>().unwrap(), ChunkStrategy::Chars);
    assert_eq!(" Tokens ".parse::<ChunkStrategy>().unwrap(), ChunkStrategy::Tokens);
    assert!("words".parse::<ChunkStrategy>().is_err());
    assert_eq!(ChunkStrategy::Tokens.to_string(), "tokens");
}

#[test]
#[serial]
fn test_validate_answering_skips_bot_token() {
    reset_env();
    let reference = reference_file();
    env::set_var("OPENAI_API_KEY", "test_key");
    env::set_var("REFERENCE_DATA_PATH", reference.path());

    let config = BotConfig::load(Some(String::new())).unwrap();

    assert!(config.validate().is_err());
    assert!(config.validate_answering().is_ok());
    reset_env();
}

#[test]
#[serial]
fn test_zero_budget_loads_but_fails_validation() {
    reset_env();
    let reference = reference_file();
    env::set_var("BOT_TOKEN", "test_token");
    env::set_var("OPENAI_API_KEY", "test_key");
    env::set_var("REFERENCE_DATA_PATH", reference.path());
    env::set_var("CHUNK_BUDGET", "0");

    let config = BotConfig::load(None).unwrap();

    assert_eq!(config.library().chunk_budget, 0);
    let err = config.validate().unwrap_err();
    assert_eq!(err.to_string(), "CHUNK_BUDGET must be greater than zero");
    reset_env();
}
