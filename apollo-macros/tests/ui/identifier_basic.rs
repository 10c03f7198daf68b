use apollo_core::value_object::ValueObject;
use apollo_macros::identifier;
use std::collections::BTreeSet;

#[identifier]
struct RegionName(String);

impl ValueObject for RegionName {
    type Error = String;

    fn validate(&self) -> Result<(), Self::Error> {
        if self.0.is_empty() {
            return Err("empty region name".to_string());
        }
        Ok(())
    }
}

#[identifier(debug = false)]
#[derive(Clone)]
struct Secret(String);

impl ValueObject for Secret {
    type Error = String;

    fn validate(&self) -> Result<(), Self::Error> {
        Ok(())
    }
}

impl std::fmt::Debug for Secret {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Secret(..)")
    }
}

fn main() {
    let region = RegionName::new("MainRegion").unwrap();
    assert_eq!(region.as_str(), "MainRegion");
    assert_eq!(region.to_string(), "MainRegion");
    assert!(RegionName::new("").is_err());

    // Ord/Hash 可用于有序集合
    let set: BTreeSet<RegionName> = ["b", "a"].iter().map(|s| s.parse().unwrap()).collect();
    assert_eq!(set.iter().next().unwrap().as_str(), "a");

    // serde 以字符串透明序列化
    let json = serde_json::to_string(&region).unwrap();
    assert_eq!(json, "\"MainRegion\"");
    assert!(serde_json::from_str::<RegionName>("\"\"").is_err());

    // 用户已声明的 derive 与宏追加的不冲突；Debug 使用手写实现
    let s = Secret::new("x").unwrap();
    assert_eq!(format!("{:?}", s.clone()), "Secret(..)");
}
