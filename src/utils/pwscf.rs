//! # pw.x SCF 输入模板生成工具
//!
//! 把 relax 计算提取出来的坐标块和晶胞块拼入固定的 scf.in 骨架。
//! 两个块是逐字传递的文本，模板本身不解析其内容。
//!
//! ## 依赖关系
//! - 被 `commands/scf.rs` 使用
//! - 无外部模块依赖

/// SCF 输入参数
pub struct ScfConfig {
    pub prefix: String,
    pub outdir: String,
    pub pseudo_dir: String,
    pub nat: usize,
    pub ntyp: usize,
    pub ecutwfc: f64,
    pub ecutrho: f64,
    pub degauss: f64,
    pub conv_thr: String,
    pub mixing_beta: f64,
    /// ATOMIC_SPECIES 块体（不含标题行）
    pub species: String,
    /// K_POINTS automatic 的一行网格
    pub kpoints: String,
}

impl Default for ScfConfig {
    fn default() -> Self {
        ScfConfig {
            prefix: "slab".to_string(),
            outdir: "./tmp".to_string(),
            pseudo_dir: "./pseudo".to_string(),
            nat: 16,
            ntyp: 2,
            ecutwfc: 60.0,
            ecutrho: 480.0,
            degauss: 0.02,
            conv_thr: "1.0d-8".to_string(),
            mixing_beta: 0.7,
            species: "Mo  95.95  Mo.pbe-spn-rrkjus_psl.1.0.0.UPF\n\
                      S   32.06  S.pbe-n-rrkjus_psl.1.0.0.UPF"
                .to_string(),
            kpoints: "6 6 1 0 0 0".to_string(),
        }
    }
}

/// 生成 scf.in 内容
pub fn generate_scf_input(config: &ScfConfig, cell_block: &str, positions_block: &str) -> String {
    format!(
        r#"&CONTROL
    calculation = 'scf'
    prefix = '{}'
    outdir = '{}'
    pseudo_dir = '{}'
    verbosity = 'high'
    tprnfor = .true.
    tstress = .true.
/
&SYSTEM
    ibrav = 0
    nat = {}
    ntyp = {}
    ecutwfc = {}
    ecutrho = {}
    occupations = 'smearing'
    smearing = 'gaussian'
    degauss = {}
/
&ELECTRONS
    conv_thr = {}
    mixing_beta = {}
/
ATOMIC_SPECIES
{}
CELL_PARAMETERS angstrom
{}
ATOMIC_POSITIONS angstrom
{}
K_POINTS automatic
{}
"#,
        config.prefix,
        config.outdir,
        config.pseudo_dir,
        config.nat,
        config.ntyp,
        config.ecutwfc,
        config.ecutrho,
        config.degauss,
        config.conv_thr,
        config.mixing_beta,
        config.species,
        cell_block.trim_end(),
        positions_block.trim_end(),
        config.kpoints,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_scf_input_splices_blocks() {
        let cell = "   3.16  0.00  0.00\n   0.00  3.16  0.00\n   0.00  0.00 30.00\n";
        let positions = "Mo  0.0  0.0  0.0\nS   1.0  1.0  1.5\n";
        let text = generate_scf_input(&ScfConfig::default(), cell, positions);

        assert!(text.contains("calculation = 'scf'"));
        assert!(text.contains("nat = 16"));
        assert!(text.contains("   0.00  0.00 30.00"));
        assert!(text.contains("S   1.0  1.0  1.5"));
        // 块紧跟在各自的标题行之后
        let cell_at = text.find("CELL_PARAMETERS angstrom\n").unwrap();
        assert!(text[cell_at..].starts_with("CELL_PARAMETERS angstrom\n   3.16"));
        let pos_at = text.find("ATOMIC_POSITIONS angstrom\n").unwrap();
        assert!(text[pos_at..].starts_with("ATOMIC_POSITIONS angstrom\nMo  0.0"));
    }

    #[test]
    fn test_custom_prefix_lands_in_control_block() {
        let config = ScfConfig {
            prefix: "mos2_5l".to_string(),
            ..ScfConfig::default()
        };
        let text = generate_scf_input(&config, "", "");
        assert!(text.contains("prefix = 'mos2_5l'"));
    }
}
