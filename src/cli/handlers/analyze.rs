//! Mind map analysis handler

use std::path::PathBuf;
use std::sync::Arc;

use crate::analysis::{AnalysisOutcome, MindMapAnalyzer, MindMapExport};
use crate::cli::handlers::import::read_conversations;
use crate::cli::output::{print_info, print_mind_map, print_no_data, print_success};
use crate::config::AnalysisConfig;
use crate::database::Database;
use crate::store::{InMemoryMessageStore, MessageStore};
use crate::text::PortugueseModel;
use crate::AppConfig;
use crate::Result;

/// Command-line overrides of the analysis settings
#[derive(Debug, Clone, Default)]
pub struct AnalyzeOptions {
    pub limit: Option<usize>,
    pub days_back: Option<i64>,
    pub top_n: Option<usize>,
    pub threshold: Option<f64>,
    pub input: Option<PathBuf>,
    pub persist: bool,
    pub export: Option<PathBuf>,
}

impl AnalyzeOptions {
    /// Configured settings with overrides applied and validated
    pub fn apply_to(&self, base: &AnalysisConfig) -> Result<AnalysisConfig> {
        let mut config = base.clone();
        if let Some(limit) = self.limit {
            config.message_limit = limit;
        }
        if let Some(days_back) = self.days_back {
            config.days_back = days_back;
        }
        if let Some(top_n) = self.top_n {
            config.top_n = top_n;
        }
        if let Some(threshold) = self.threshold {
            config.edge_threshold = threshold;
        }
        config.persist_results |= self.persist;
        config.validate()?;
        Ok(config)
    }
}

/// Handle analyze command
pub async fn handle_analyze_command(
    app_config: &AppConfig,
    user_id: &str,
    options: AnalyzeOptions,
) -> Result<()> {
    let config = options.apply_to(app_config.analysis())?;
    let language = Arc::new(PortugueseModel::new());

    let analyzer = match &options.input {
        Some(path) => {
            let conversations = read_conversations(path)?;
            print_info(&format!(
                "📂 Analyzing {} from {} ({} conversations)",
                user_id,
                path.display(),
                conversations.len()
            ));
            let store: Arc<dyn MessageStore> =
                Arc::new(InMemoryMessageStore::with_conversations(conversations));
            MindMapAnalyzer::new(store, language, config.clone())
        }
        None => {
            let database = Arc::new(Database::from_config(app_config).await?);
            database.verify_schema_or_error().await?;
            print_info(&format!("🗄️  Analyzing {user_id} from the database"));
            let analyzer = MindMapAnalyzer::new(database.clone(), language, config.clone());
            if config.persist_results {
                analyzer.with_sink(database)
            } else {
                analyzer
            }
        }
    };

    match analyzer.run(user_id).await? {
        AnalysisOutcome::NoData(reason) => print_no_data(user_id, reason),
        AnalysisOutcome::Complete(map) => {
            println!();
            print_mind_map(user_id, &map);

            if let Some(path) = &options.export {
                let json = MindMapExport::from(&map).to_json_pretty()?;
                std::fs::write(path, json)?;
                print_success(&format!("Mind map written to {}", path.display()));
            }
        }
    }
    analyzer.flush_persistence().await;

    Ok(())
}
