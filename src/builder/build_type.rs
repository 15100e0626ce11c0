//! The known build types.

/// Build types accepted on the command line and by the native tool.
pub const BUILD_TYPES: &[&str] = &["release", "debug", "minSizeRel", "relWithDebInfo", "coverage"];

pub fn is_known_build_type(build_type: &str) -> bool {
    BUILD_TYPES.contains(&build_type)
}

/// CMake spelling of a build type: `minSizeRel` becomes `MinSizeRel`.
pub fn cmake_build_type(build_type: &str) -> String {
    let mut chars = build_type.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
