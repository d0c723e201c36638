//! Files bundled into the binary at compile time

/// POSIX wrapper launcher
pub const GRADLEW_SH: &str = include_str!("../../resources/gradlew");

/// Windows wrapper launcher (CRLF line endings, written untranslated)
pub const GRADLEW_CMD: &str = include_str!("../../resources/gradlew.bat");

/// Wrapper bootstrap jar; binary, never substituted
pub const GRADLE_WRAPPER_JAR: &[u8] = include_bytes!("../../resources/gradle-wrapper.jar");

pub const GRADLE_WRAPPER_PROPERTIES: &str =
    include_str!("../../resources/gradle-wrapper.properties");

/// Kotlin build script; `{endpoint}` and `{group}` are replaced on generation
pub const BUILD_SCRIPT: &str = include_str!("../../resources/build.gradle.kts.txt");

/// Project readme; `{projectname}` is replaced on generation
pub const README: &str = include_str!("../../resources/README.md");

pub const IGNORE: &str = r#".idea/
.gradle
build/
dest/
out/
bin/

gradle-app.setting

!gradle-wrapper.jar

.gradletasknamecache

# # Work around https://youtrack.jetbrains.com/issue/IDEA-116898
# gradle/wrapper/gradle-wrapper.properties"#;

/// Everything in `libs/` except this file; the SDK is fetched, not committed
pub const IGNORE_LIBS: &str = "*\n!.gitignore\n";

pub const PROPERTIES: &str = "kotlin.code.style=official";

pub const TRAVIS: &str = r#"language: java
install: true

jdk:
  - oraclejdk8

script:
  - ./gradlew check

before_cache:
  - rm -f $HOME/.gradle/caches/modules-2/modules-2.lock
  - rm -fr $HOME/.gradle/caches/*/plugin-resolution/

cache:
  directories:
    - $HOME/.gradle/caches/
    - $HOME/.gradle/wrapper/
"#;
