//! Adapter enumeration and the device report.
//!
//! The report is built from plain values ([`AdapterReport`]) so the text can
//! be checked without a GPU; [`AdapterReport::from_adapter`] is the only part
//! that talks to wgpu.

use std::fmt::{self, Write as _};

use structopt::{
    StructOpt,
    clap::{self, AppSettings},
};

/// Displays information about the Metal devices in the system.
///
/// Takes no options. Anything after the first positional argument or after
/// `--` is accepted and ignored.
#[derive(Debug, StructOpt)]
#[structopt(
    name = "device-info",
    no_version,
    setting = AppSettings::DisableVersion,
    setting = AppSettings::TrailingVarArg
)]
pub struct CliOptions {
    #[structopt(hidden = true)]
    pub ignored: Vec<String>,
}

/// Exit status for a command line that failed to parse. Asking for help is
/// not a failure.
pub fn usage_exit_code(err: &clap::Error) -> i32 {
    match err.kind {
        clap::ErrorKind::HelpDisplayed => 0,
        _ => 2,
    }
}

pub fn yes(v: bool) -> &'static str {
    if v { "yes" } else { "no" }
}

pub fn supported(v: bool) -> &'static str {
    if v { "✅ supported" } else { "❌ unsupported" }
}

const FEATURES: &[(&str, wgpu::Features)] = &[
    ("Depth clip control", wgpu::Features::DEPTH_CLIP_CONTROL),
    ("Depth32 float + stencil8", wgpu::Features::DEPTH32FLOAT_STENCIL8),
    ("BC texture compression", wgpu::Features::TEXTURE_COMPRESSION_BC),
    ("ETC2 texture compression", wgpu::Features::TEXTURE_COMPRESSION_ETC2),
    ("ASTC texture compression", wgpu::Features::TEXTURE_COMPRESSION_ASTC),
    ("Timestamp queries", wgpu::Features::TIMESTAMP_QUERY),
    ("Indirect first instance", wgpu::Features::INDIRECT_FIRST_INSTANCE),
    ("16-bit floats in shaders", wgpu::Features::SHADER_F16),
    ("RG11B10 float renderable", wgpu::Features::RG11B10UFLOAT_RENDERABLE),
    ("BGRA8 storage textures", wgpu::Features::BGRA8UNORM_STORAGE),
    ("Filterable 32-bit float textures", wgpu::Features::FLOAT32_FILTERABLE),
    ("Dual-source blending", wgpu::Features::DUAL_SOURCE_BLENDING),
    ("Push constants", wgpu::Features::PUSH_CONSTANTS),
    ("Texture binding arrays", wgpu::Features::TEXTURE_BINDING_ARRAY),
    ("Line polygon mode", wgpu::Features::POLYGON_MODE_LINE),
    ("64-bit floats in shaders", wgpu::Features::SHADER_F64),
];

const DOWNLEVEL: &[(&str, wgpu::DownlevelFlags)] = &[
    ("Compute shaders", wgpu::DownlevelFlags::COMPUTE_SHADERS),
    ("Writable storage in fragment shaders", wgpu::DownlevelFlags::FRAGMENT_WRITABLE_STORAGE),
    ("Indirect execution", wgpu::DownlevelFlags::INDIRECT_EXECUTION),
    ("Base vertex", wgpu::DownlevelFlags::BASE_VERTEX),
    ("Independent blending", wgpu::DownlevelFlags::INDEPENDENT_BLEND),
    ("Anisotropic filtering", wgpu::DownlevelFlags::ANISOTROPIC_FILTERING),
    ("Cube array textures", wgpu::DownlevelFlags::CUBE_ARRAY_TEXTURES),
];

/// Everything the report prints about one adapter.
#[derive(Clone, Debug, PartialEq)]
pub struct AdapterReport {
    pub name: String,
    pub device_type: wgpu::DeviceType,
    pub vendor: u32,
    pub device: u32,
    pub driver: String,
    pub driver_info: String,
    pub features: wgpu::Features,
    pub downlevel: wgpu::DownlevelFlags,
}

impl AdapterReport {
    pub fn from_adapter(adapter: &wgpu::Adapter) -> Self {
        let info = adapter.get_info();
        Self {
            name: info.name,
            device_type: info.device_type,
            vendor: info.vendor,
            device: info.device,
            driver: info.driver,
            driver_info: info.driver_info,
            features: adapter.features(),
            downlevel: adapter.get_downlevel_capabilities().flags,
        }
    }

    /// Integrated GPUs are the low-power choice on machines with two.
    pub fn low_power(&self) -> bool {
        self.device_type == wgpu::DeviceType::IntegratedGpu
    }

    pub fn software(&self) -> bool {
        self.device_type == wgpu::DeviceType::Cpu
    }

    pub fn render(&self) -> String {
        let mut out = String::new();
        // writing into a String cannot fail
        let _ = self.write_to(&mut out);
        out
    }

    fn write_to(&self, out: &mut String) -> fmt::Result {
        writeln!(out, "{}:", self.name)?;
        writeln!(out, "\t• low-power: {}", yes(self.low_power()))?;
        writeln!(out, "\t• software: {}", yes(self.software()))?;
        writeln!(out, "\t• device type: {:?}", self.device_type)?;
        writeln!(out, "\t• vendor ID: {:#06x}", self.vendor)?;
        writeln!(out, "\t• device ID: {:#06x}", self.device)?;
        if self.driver.is_empty() {
            writeln!(out, "\t• driver: unknown")?;
        } else {
            writeln!(out, "\t• driver: {} {}", self.driver, self.driver_info)?;
        }
        writeln!(out)?;
        writeln!(out, "\tFeatures:")?;
        for (label, feature) in FEATURES {
            writeln!(out, "\t• {label}: {}", supported(self.features.contains(*feature)))?;
        }
        writeln!(out)?;
        writeln!(out, "\tDownlevel capabilities:")?;
        for (label, flag) in DOWNLEVEL {
            writeln!(out, "\t• {label}: {}", supported(self.downlevel.contains(*flag)))?;
        }
        Ok(())
    }
}

/// All Metal adapters, preferred one first when the platform has a
/// preference.
pub async fn metal_adapters() -> anyhow::Result<(AdapterReport, Vec<AdapterReport>)> {
    let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
        backends: wgpu::Backends::METAL,
        ..Default::default()
    });
    let preferred = instance
        .request_adapter(&wgpu::RequestAdapterOptions::default())
        .await
        .map_err(|e| anyhow::anyhow!("Metal is not supported on this system: {e}"))?;
    let all = instance
        .enumerate_adapters(wgpu::Backends::METAL)
        .iter()
        .map(AdapterReport::from_adapter)
        .collect();
    Ok((AdapterReport::from_adapter(&preferred), all))
}

#[cfg(test)]
mod tests {
    use std::iter;

    use super::*;

    fn report(device_type: wgpu::DeviceType) -> AdapterReport {
        AdapterReport {
            name: "Apple M2".to_owned(),
            device_type,
            vendor: 0x106b,
            device: 0x2,
            driver: String::new(),
            driver_info: String::new(),
            features: wgpu::Features::TIMESTAMP_QUERY | wgpu::Features::SHADER_F16,
            downlevel: wgpu::DownlevelFlags::COMPUTE_SHADERS,
        }
    }

    fn parse(args: &[&str]) -> Result<CliOptions, clap::Error> {
        CliOptions::from_iter_safe(iter::once("device-info").chain(args.iter().copied()))
    }

    #[test]
    fn no_arguments_runs() {
        assert!(parse(&[]).unwrap().ignored.is_empty());
    }

    #[test]
    fn positional_arguments_are_ignored() {
        assert_eq!(parse(&["extra"]).unwrap().ignored, ["extra"]);
        assert_eq!(parse(&["--", "-x"]).unwrap().ignored, ["-x"]);
        assert!(parse(&["--"]).unwrap().ignored.is_empty());
    }

    #[test]
    fn help_exits_successfully() {
        for flag in ["-h", "--help"] {
            let err = parse(&[flag]).unwrap_err();
            assert_eq!(err.kind, clap::ErrorKind::HelpDisplayed, "{flag}");
            assert_eq!(usage_exit_code(&err), 0);
        }
    }

    #[test]
    fn unknown_flag_exits_with_usage_error() {
        for flag in ["-x", "--verbose", "-V"] {
            let err = parse(&[flag]).unwrap_err();
            assert_eq!(err.kind, clap::ErrorKind::UnknownArgument, "{flag}");
            assert_eq!(usage_exit_code(&err), 2);
        }
    }

    #[test]
    fn words_for_booleans() {
        assert_eq!(yes(true), "yes");
        assert_eq!(yes(false), "no");
        assert_eq!(supported(true), "✅ supported");
        assert_eq!(supported(false), "❌ unsupported");
    }

    #[test]
    fn integrated_gpu_is_low_power() {
        assert!(report(wgpu::DeviceType::IntegratedGpu).low_power());
        assert!(!report(wgpu::DeviceType::DiscreteGpu).low_power());
        assert!(report(wgpu::DeviceType::Cpu).software());
    }

    #[test]
    fn report_lists_every_feature_once() {
        let text = report(wgpu::DeviceType::IntegratedGpu).render();

        assert!(text.starts_with("Apple M2:\n"));
        assert!(text.contains("\t• low-power: yes\n"));
        assert!(text.contains("\t• vendor ID: 0x106b\n"));
        assert!(text.contains("\t• driver: unknown\n"));
        assert!(text.contains("\t• Timestamp queries: ✅ supported\n"));
        assert!(text.contains("\t• 16-bit floats in shaders: ✅ supported\n"));
        assert!(text.contains("\t• Push constants: ❌ unsupported\n"));
        assert!(text.contains("\t• Compute shaders: ✅ supported\n"));
        assert!(text.contains("\t• Base vertex: ❌ unsupported\n"));
        assert_eq!(
            text.matches("supported").count(),
            FEATURES.len() + DOWNLEVEL.len()
        );
    }
}
