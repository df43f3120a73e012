use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use suivi_candidatures_common::{RecordDraft, Reponse, SortKey, Visite};

#[derive(Parser)]
#[command(name = "suivi")]
#[command(about = "Suivi des candidatures en restaurant (liste, carte, export)", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// 詳細ログを出力
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// データディレクトリ（省略時は設定ファイル/OS標準）
    #[arg(long, global = true)]
    pub data_dir: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// 一覧を表示（検索・並べ替え）
    Liste {
        /// 検索語（全フィールド、大文字小文字を区別しない）
        #[arg(short, long)]
        recherche: Option<String>,

        /// 並べ替えキー。同じキーを2回指定すると降順
        #[arg(short, long)]
        tri: Vec<SortKey>,
    },

    /// 新しい応募先を追加
    Ajouter {
        #[command(flatten)]
        champs: DraftArgs,

        /// 対話入力
        #[arg(short, long)]
        interactif: bool,
    },

    /// 応募先を編集
    Modifier {
        /// 番号（1始まり）またはID
        #[arg(required = true)]
        cible: String,

        #[command(flatten)]
        champs: DraftArgs,

        /// 対話入力
        #[arg(short, long)]
        interactif: bool,
    },

    /// 応募先を削除
    Supprimer {
        /// 番号（1始まり）またはID
        #[arg(required = true)]
        cible: String,

        /// 確認なしで削除
        #[arg(long)]
        oui: bool,
    },

    /// 地図: マーカー一覧、選択、HTML出力
    Carte {
        /// 中心にする応募先（番号またはID）
        cible: Option<String>,

        /// Leafletページの出力先
        #[arg(long)]
        html: Option<PathBuf>,
    },

    /// 集計を表示
    Stats,

    /// CSV/Excelに書き出し
    Exporter {
        /// 出力形式 (csv/excel/both)
        #[arg(short, long, default_value = "csv")]
        format: ExportFormat,

        /// 出力ファイル/ディレクトリ（省略時はカレント）
        #[arg(short, long)]
        sortie: Option<PathBuf>,
    },

    /// 設定を表示/編集
    Config {
        /// データディレクトリを設定
        #[arg(long)]
        set_data_dir: Option<PathBuf>,

        /// 設定を表示
        #[arg(long)]
        show: bool,
    },
}

/// フォームの各項目（指定したものだけ上書き）
#[derive(Args, Debug, Default, Clone)]
pub struct DraftArgs {
    #[arg(long)]
    pub restaurant: Option<String>,

    /// 送付日 (YYYY-MM-DD)
    #[arg(long)]
    pub date: Option<String>,

    #[arg(long)]
    pub telephone: Option<String>,

    #[arg(long)]
    pub chef: Option<String>,

    /// oui / non / attente
    #[arg(long)]
    pub visite: Option<Visite>,

    /// positive / negative / attente
    #[arg(long)]
    pub reponse: Option<Reponse>,

    #[arg(long)]
    pub commentaires: Option<String>,

    /// 緯度（読めない値はパリ中心）
    #[arg(long, allow_hyphen_values = true)]
    pub lat: Option<String>,

    /// 経度（読めない値はパリ中心）
    #[arg(long, allow_hyphen_values = true)]
    pub lng: Option<String>,
}

impl DraftArgs {
    pub fn apply_to(&self, draft: &mut RecordDraft) {
        let set = |target: &mut String, value: &Option<String>| {
            if let Some(v) = value {
                *target = v.clone();
            }
        };
        set(&mut draft.restaurant, &self.restaurant);
        set(&mut draft.date_envoi, &self.date);
        set(&mut draft.telephone, &self.telephone);
        set(&mut draft.chef, &self.chef);
        set(&mut draft.commentaires, &self.commentaires);
        set(&mut draft.lat, &self.lat);
        set(&mut draft.lng, &self.lng);
        if let Some(visite) = self.visite {
            draft.visite = visite;
        }
        if let Some(reponse) = self.reponse {
            draft.reponse = reponse;
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum ExportFormat {
    #[default]
    Csv,
    Excel,
    Both,
}

impl std::str::FromStr for ExportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "csv" => Ok(ExportFormat::Csv),
            "excel" | "xlsx" => Ok(ExportFormat::Excel),
            "both" => Ok(ExportFormat::Both),
            _ => Err(format!("Format inconnu: {}. Utiliser csv, excel ou both", s)),
        }
    }
}

impl std::fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExportFormat::Csv => write!(f, "csv"),
            ExportFormat::Excel => write!(f, "excel"),
            ExportFormat::Both => write!(f, "both"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_liste_with_repeated_sort() {
        let cli = Cli::parse_from(["suivi", "liste", "--tri", "date", "--tri", "date"]);
        match cli.command {
            Commands::Liste { tri, recherche } => {
                assert_eq!(tri, vec![SortKey::DateEnvoi, SortKey::DateEnvoi]);
                assert!(recherche.is_none());
            }
            _ => panic!("liste attendu"),
        }
    }

    #[test]
    fn test_draft_args_only_override_given_fields() {
        let mut draft = RecordDraft::blank();
        draft.chef = "Rangama".into();
        let args = DraftArgs {
            restaurant: Some("Le Faham".into()),
            visite: Some(Visite::Oui),
            ..Default::default()
        };
        args.apply_to(&mut draft);
        assert_eq!(draft.restaurant, "Le Faham");
        assert_eq!(draft.chef, "Rangama");
        assert_eq!(draft.visite, Visite::Oui);
        assert_eq!(draft.lat, "48.8566");
    }

    #[test]
    fn test_export_format_from_str() {
        assert_eq!("XLSX".parse::<ExportFormat>().unwrap(), ExportFormat::Excel);
        assert!("pdf".parse::<ExportFormat>().is_err());
    }
}
