use std::fmt::{Display, Formatter};
use std::sync::RwLock;

#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Default)]
pub enum Locale {
    #[default]
    ZhCn,
    EnUs,
}

impl Locale {
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag.trim().to_ascii_lowercase().replace('_', "-").as_str() {
            "zh" | "zh-cn" | "zh-hans" | "cn" => Some(Self::ZhCn),
            "en" | "en-us" | "en-gb" => Some(Self::EnUs),
            _ => None,
        }
    }

    pub fn tag(self) -> &'static str {
        match self {
            Self::ZhCn => "zh-CN",
            Self::EnUs => "en-US",
        }
    }
}

impl Display for Locale {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.tag())
    }
}

static ACTIVE_LOCALE: RwLock<Locale> = RwLock::new(Locale::ZhCn);

/// Sets the process-wide locale used by label filters.
pub fn init(locale: Locale) {
    match ACTIVE_LOCALE.write() {
        Ok(mut active) => *active = locale,
        Err(poisoned) => *poisoned.into_inner() = locale,
    }
}

pub fn current() -> Locale {
    ACTIVE_LOCALE
        .read()
        .map(|active| *active)
        .unwrap_or_default()
}

/// Restores the default locale.
pub fn reset() {
    init(Locale::default());
}

/// Display name for a well-known node role, `None` for anything else.
pub fn node_role_name(role: &str, locale: Locale) -> Option<&'static str> {
    let (zh, en) = match role {
        "master" => ("主节点", "Master"),
        "control-plane" => ("控制平面", "Control Plane"),
        "worker" => ("工作节点", "Worker"),
        "ingress" => ("入口节点", "Ingress"),
        "storage" => ("存储节点", "Storage"),
        "compute" => ("计算节点", "Compute"),
        "agent" => ("代理节点", "Agent"),
        _ => return None,
    };
    Some(match locale {
        Locale::ZhCn => zh,
        Locale::EnUs => en,
    })
}

#[cfg(test)]
pub(crate) static LOCALE_TEST_LOCK: std::sync::Mutex<()> = std::sync::Mutex::new(());

#[cfg(test)]
mod tests {
    use super::{LOCALE_TEST_LOCK, Locale, current, init, node_role_name, reset};

    #[test]
    fn locale_tags_are_parsed_loosely() {
        assert_eq!(Locale::from_tag("zh_CN"), Some(Locale::ZhCn));
        assert_eq!(Locale::from_tag(" EN-us "), Some(Locale::EnUs));
        assert_eq!(Locale::from_tag("fr"), None);
    }

    #[test]
    fn init_and_reset_swap_the_active_locale() {
        let _guard = LOCALE_TEST_LOCK.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        init(Locale::EnUs);
        assert_eq!(current(), Locale::EnUs);
        reset();
        assert_eq!(current(), Locale::ZhCn);
    }

    #[test]
    fn role_names_are_localized() {
        assert_eq!(node_role_name("master", Locale::ZhCn), Some("主节点"));
        assert_eq!(node_role_name("control-plane", Locale::EnUs), Some("Control Plane"));
        assert_eq!(node_role_name("gpu", Locale::ZhCn), None);
    }
}
