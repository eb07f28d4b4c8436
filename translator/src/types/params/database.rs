use crate::cli::database::mongodb::MongoDBCliArgs;
use crate::TranslatorError;

#[derive(Debug, Clone)]
pub struct DatabaseArgs {
    pub connection_uri: String,
    pub database_name: String,
}

impl TryFrom<MongoDBCliArgs> for DatabaseArgs {
    type Error = TranslatorError;
    fn try_from(args: MongoDBCliArgs) -> Result<Self, Self::Error> {
        if !args.mongodb {
            return Err(TranslatorError::ConfigError("Database is not selected, pass --mongodb".to_string()));
        }
        Ok(Self {
            connection_uri: args
                .mongodb_connection_url
                .ok_or_else(|| TranslatorError::DatabaseInvalidURIError("connection url is missing".to_string()))?,
            database_name: args
                .mongodb_database_name
                .ok_or_else(|| TranslatorError::ConfigError("Database name is required".to_string()))?,
        })
    }
}
