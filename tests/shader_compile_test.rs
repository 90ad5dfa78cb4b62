#[cfg(feature = "integration-tests")]
mod common;

#[test]
#[cfg(feature = "integration-tests")]
fn bundled_shaders_compile() {
    use futures::executor::block_on;
    use gfx_primer::shader;

    let (device, _) = common::test_utils::headless_device();
    for (label, source) in [
        ("Rainbow Shader", shader::RAINBOW_WGSL),
        ("Textured Shader", shader::TEXTURED_WGSL),
        ("Moving Shader", shader::MOVING_WGSL),
    ] {
        if let Err(e) = block_on(shader::compile(&device, label, source)) {
            panic!("{e}");
        }
    }
}

#[test]
#[cfg(feature = "integration-tests")]
fn broken_shader_reports_the_compiler_log() {
    use futures::executor::block_on;
    use gfx_primer::shader::{self, ShaderError};

    let broken = r#"
        @fragment
        fn fs_main() -> @location(0) vec4<f32> {
            return colr;
        }
    "#;

    let (device, _) = common::test_utils::headless_device();
    let err = block_on(shader::compile(&device, "Broken Shader", broken))
        .expect_err("an undefined identifier must not compile");

    let ShaderError::Compile { label, log } = &err;
    assert_eq!(label, "Broken Shader");
    assert!(log.contains("colr"), "compiler log lost the offending name: {log}");
    assert_eq!(err.to_string(), format!("failed to compile Broken Shader: {log}"));
}
