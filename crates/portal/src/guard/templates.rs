use askama::Template;

#[derive(Debug, Clone)]
pub struct NavLink {
    pub label: &'static str,
    pub href: String,
    pub active: bool,
}

#[derive(Template, Debug)]
#[template(path = "admin/layout.html")]
pub struct LayoutTemplate<'a> {
    pub title: &'a str,
    pub heading: &'a str,
    pub username: &'a str,
    pub role: &'a str,
    pub read_only: bool,
    pub nav: Vec<NavLink>,
    pub action: &'a str,
    pub api_href: &'a str,
    pub create_href: Option<String>,
}

#[derive(Template, Debug)]
#[template(path = "admin/denied.html")]
pub struct DeniedTemplate<'a> {
    pub title: &'a str,
    pub role: Option<&'a str>,
    pub login_path: &'a str,
}

#[derive(Template, Debug)]
#[template(path = "admin/blank.html")]
pub struct BlankTemplate<'a> {
    pub title: &'a str,
}

#[derive(Template, Debug)]
#[template(path = "admin/login.html")]
pub struct LoginTemplate<'a> {
    pub title: &'a str,
    pub login_path: &'a str,
    pub username: &'a str,
    pub error: Option<&'a str>,
}
