use adboard_runtime::Config;
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct ConfigViewModel {
    pub path: String,
    pub exists: bool,
    pub config: Config,
}
