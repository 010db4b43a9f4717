use super::CinemaData;
use anyhow::Context;
use std::fs;
use std::path::Path;

/// Читает снимок состояния с диска. Отсутствие или порча файла —
/// не фатальная ситуация, решение принимает вызывающая сторона.
pub fn load(path: &Path) -> anyhow::Result<CinemaData> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("failed to read snapshot {}", path.display()))?;
    let data = serde_json::from_str(&raw)
        .with_context(|| format!("failed to parse snapshot {}", path.display()))?;
    Ok(data)
}

/// Пишет снимок атомарно: сначала во временный файл рядом, затем rename.
pub fn save(path: &Path, data: &CinemaData) -> anyhow::Result<()> {
    let raw = serde_json::to_string_pretty(data).context("failed to serialize snapshot")?;
    let tmp = path.with_extension("tmp");
    fs::write(&tmp, raw).with_context(|| format!("failed to write {}", tmp.display()))?;
    fs::rename(&tmp, path)
        .with_context(|| format!("failed to move snapshot into place {}", path.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Hall;

    #[test]
    fn snapshot_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("state.json");

        let mut data = CinemaData::default();
        data.halls.push(Hall::new(1, "Зал 1"));

        save(&path, &data).unwrap();
        let restored = load(&path).unwrap();
        assert_eq!(restored.halls.len(), 1);
        assert_eq!(restored.halls[0].hall_name, "Зал 1");
    }

    #[test]
    fn missing_snapshot_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(load(&dir.path().join("nope.json")).is_err());
    }

    #[test]
    fn corrupt_snapshot_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("state.json");
        std::fs::write(&path, "{not json").unwrap();
        assert!(load(&path).is_err());
    }
}
