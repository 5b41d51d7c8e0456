pub const BASE_URL: &str = "https://my.beeline.ru";

pub const ROOT_PATH: &str = "/";
pub const LOGIN_PATH: &str = "/login.xhtml";
pub const INDEX_PATH: &str = "/c/pre/index.xhtml";

/// Redirects followed by a single request unless the caller says otherwise.
pub const DEFAULT_REDIRECTS: u8 = 5;

/// Value the portal puts in the view state when the user is not signed in.
pub const STATELESS_VIEW_STATE: &str = "stateless";

// Literal markers in the portal markup. When the portal changes its pages,
// these are the only strings that should need updating. A missing closing
// delimiter extends the fragment to the end of the response.
pub const VIEW_STATE_PATTERN: &str = r#"(?s)id="j_id1:javax\.faces\.ViewState:0"(?P<input>.*?)(?:/>|$)"#;
pub const VIEW_STATE_VALUE_PATTERN: &str = r#"value="(?P<value>[^"]*)""#;
pub const BALANCE_PATTERN: &str = r#"(?s)j_idt1467:j_idt1469(?P<block>.*?)(?:</div>|$)"#;
pub const BALANCE_PRICE_PATTERN: &str = r#"span class="price[^"]*">(?P<amount>[^<]*)"#;
pub const DATA_PLAN_PATTERN: &str = r#"(?s)<div class="val">(?P<values>.*?)(?:</div>|$)"#;

pub const VIEW_STATE_FIELD: &str = "javax.faces.ViewState";

pub const LOGIN_FORM: [(&str, &str); 4] = [
    ("selectMobileLk", "1"),
    (VIEW_STATE_FIELD, STATELESS_VIEW_STATE),
    ("loginFormB2C:loginForm", "loginFormB2C:loginForm"),
    ("loginFormB2C:loginForm:loginButton", ""),
];
pub const LOGIN_FIELD: &str = "loginFormB2C:loginForm:login";
pub const PASSWORD_FIELD: &str = "loginFormB2C:loginForm:password";

/// Fields shared by every AJAX partial-render request.
pub const PARTIAL_AJAX_FORM: [(&str, &str); 2] = [
    ("javax.faces.partial.execute", "@all"),
    ("javax.faces.partial.ajax", "true"),
];

pub const BALANCE_FORM: [(&str, &str); 4] = [
    ("javax.faces.partial.render", "j_idt1245:homeBalance"),
    ("javax.faces.source", "j_idt1245:j_idt1247:j_idt1248"),
    ("j_idt1245:j_idt1247:j_idt1248", "j_idt1245:j_idt1247:j_idt1248"),
    ("j_idt1245:j_idt1247", "j_idt1245:j_idt1247"),
];

pub const DATA_PLAN_FORM: [(&str, &str); 4] = [
    ("javax.faces.partial.render", "bonusesForm"),
    ("javax.faces.source", "j_idt2656:j_idt2658"),
    ("j_idt2656:j_idt2658", "j_idt2656:j_idt2658"),
    ("j_idt2656", "j_idt2656"),
];
