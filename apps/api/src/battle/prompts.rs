// Battle mode LLM prompt templates.

pub const HINT_PROMPT_TEMPLATE: &str = "Current Scenario: {title}. Logic: {logic}. Give me a short, cryptic, Socrates-style hint (max 50 chars) to guide the user to the answer without giving it away.";

pub const HINT_MISSING_KEY: &str = "请配置 API Key";
pub const HINT_UNAVAILABLE: &str = "提示服务暂不可用";
pub const HINT_EMPTY: &str = "思考本质...";
