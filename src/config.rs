use std::path::PathBuf;

use structopt::StructOpt;

#[derive(StructOpt, Debug, Clone)]
#[structopt(name = "quadgrid", about = "A textured quad grid you can pan and rotate.")]
pub struct Opt {
    #[structopt(
        parse(from_os_str),
        long,
        default_value = "assets",
        help = "asset directory, relative to the executable"
    )]
    pub assets: PathBuf,
    #[structopt(long, default_value = "shaders/quad.vert", help = "vertex shader resource")]
    pub vertex: String,
    #[structopt(long, default_value = "shaders/quad.frag", help = "fragment shader resource")]
    pub fragment: String,
    #[structopt(long, default_value = "textures/wand.png", help = "texture resource")]
    pub texture: String,
    #[structopt(long, default_value = "800", help = "window width")]
    pub width: u32,
    #[structopt(long, default_value = "800", help = "window height")]
    pub height: u32,
    #[structopt(long, default_value = "120", help = "rotation speed in degrees per second")]
    pub rot_speed: f32,
    #[structopt(long, default_value = "250", help = "movement speed in units per second")]
    pub move_speed: f32,
    #[structopt(long, help = "disable vsync")]
    pub no_vsync: bool,
    #[structopt(short, long, help = "verbose shader diagnostics")]
    pub verbose: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let parsed = Opt::from_iter(&["quadgrid"]);
        assert_eq!(parsed.assets, PathBuf::from("assets"));
        assert_eq!(parsed.vertex, "shaders/quad.vert");
        assert_eq!(parsed.fragment, "shaders/quad.frag");
        assert_eq!(parsed.texture, "textures/wand.png");
        assert_eq!((parsed.width, parsed.height), (800, 800));
        assert_eq!(parsed.rot_speed, 120.0);
        assert_eq!(parsed.move_speed, 250.0);
        assert!(!parsed.no_vsync);
        assert!(!parsed.verbose);
    }

    #[test]
    fn flags_override_defaults() {
        let opt = Opt::from_iter(&[
            "quadgrid",
            "-v",
            "--no-vsync",
            "--texture",
            "textures/other.png",
            "--rot-speed",
            "45",
        ]);
        assert!(opt.verbose);
        assert!(opt.no_vsync);
        assert_eq!(opt.texture, "textures/other.png");
        assert_eq!(opt.rot_speed, 45.0);
    }
}
