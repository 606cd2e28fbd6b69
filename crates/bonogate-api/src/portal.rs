// Fixed protocol surface of the BonosVip portal.
//
// There is no published API. These paths and form fields were lifted from
// the portal's own login and validation pages; they are the entire contract.

/// Production portal root.
pub const DEFAULT_PORTAL_URL: &str = "https://empresas.bonosvip.com/";

/// Default validator display name sent with every validation call.
pub const DEFAULT_VALIDATOR: &str = "Lido San Telmo";

/// Joomla login endpoint, relative to the portal root.
pub(crate) const LOGIN_PATH: &str = "component/users/?task=user.login";

/// Voucher validation endpoint, relative to the portal root.
pub(crate) const VALIDATE_PATH: &str = "php/proc.php";

/// Referer page the portal expects on validation calls.
pub(crate) const VALIDATE_REFERER_PATH: &str = "validar-bonosvip.html";

// Fixed fields of the Joomla login form.
pub(crate) const LOGIN_OPTION: &str = "com_users";
pub(crate) const LOGIN_TASK: &str = "user.login";

/// Joomla `return` field: base64 of the portal root, fixed by the login form.
pub(crate) const LOGIN_RETURN: &str = "aHR0cHM6Ly9lbXByZXNhcy5ib25vc3ZpcC5jb20v";
