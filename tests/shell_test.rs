use anyhow::Result;
use small_dex::config::Settings;
use small_dex::{Session, Shell, SourceResolver};
use tempfile::TempDir;

async fn run_script(settings: &Settings, script: &str) -> Result<String> {
    let session = Session::new(SourceResolver::new(settings));
    let shell = Shell::new(session, settings, script.as_bytes(), Vec::new());
    let out = shell.run().await?;
    Ok(String::from_utf8(out)?)
}

#[tokio::test]
async fn test_commands_gated_until_load() -> Result<()> {
    let output = run_script(&Settings::default(), "show Pikachu\nadd Pikachu\nmine\nquit\n").await?;

    assert_eq!(output.matches("No data loaded yet").count(), 3);
    Ok(())
}

#[tokio::test]
async fn test_load_add_and_list_collection() -> Result<()> {
    let script = "load sorted\nwait\nadd Pikachu\nadd Pikachu\nadd MissingNo\nadd Charizard\nmine\nquit\n";
    let output = run_script(&Settings::default(), script).await?;

    assert!(output.contains("Loading data with TreeMap..."));
    assert!(output.contains("Data loaded successfully"));
    assert!(output.contains("'Pikachu' added to your collection."));
    assert!(output.contains("'Pikachu' is already in your collection."));
    assert!(output.contains("'MissingNo' does not exist in the data."));
    assert!(output.contains("Your collection sorted by primary type:\n\nElectric:\n- Pikachu\n\nFire:\n- Charizard\n"));
    Ok(())
}

#[tokio::test]
async fn test_show_and_ability_search() -> Result<()> {
    let script = "load\nwait\nshow Pikachu\nshow Nobody\nability LEVITATE\nability Unknown-skill\nability\nquit\n";
    let output = run_script(&Settings::default(), script).await?;

    assert!(output.contains("Name: Pikachu"));
    assert!(output.contains("Secondary type: N/A"));
    assert!(output.contains("'Nobody' does not exist in the data."));
    assert!(output.contains("Records with ability 'LEVITATE':\n\n- Gastly\n"));
    assert!(output.contains("No records found with ability 'Unknown-skill'."));
    assert!(output.contains("Please enter an ability."));
    Ok(())
}

#[tokio::test]
async fn test_list_uses_insertion_order() -> Result<()> {
    let output = run_script(&Settings::default(), "load 3\nwait\nlist\nstatus\nquit\n").await?;

    assert!(output.contains("  1. Bulbasaur       - Type: Grass      - Pokedex: #1"));
    assert!(output.contains("using LinkedHashMap"));
    Ok(())
}

#[tokio::test]
async fn test_invalid_map_type_is_reported() -> Result<()> {
    let output = run_script(&Settings::default(), "load skiplist\nstatus\n").await?;

    assert!(output.contains("Invalid map type: skiplist"));
    assert!(output.contains("No data loaded."));
    Ok(())
}

#[tokio::test]
async fn test_manual_selection_after_failed_search() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let manual = temp_dir.path().join("picked.csv");
    std::fs::write(
        &manual,
        "Name,Pokedex Number,Type1,Type2,Classification,Height (m),Weight (kg),Abilities,Generation,Legendary Status\n\
         Eevee,133,Normal,,Evolution Pokémon,0.3,6.5,\"Run-away, Adaptability\",1,No\n",
    )?;

    let settings = Settings {
        data_file_name: "creatures.csv".to_string(),
        default_path: temp_dir.path().join("none.csv").to_string_lossy().to_string(),
        search_root: temp_dir.path().join("empty").to_string_lossy().to_string(),
        ..Settings::default()
    };

    let script = format!("load\nwait\ny\n{}\nwait\nshow Eevee\nquit\n", manual.display());
    let output = run_script(&settings, &script).await?;

    assert!(output.contains("Could not find the data file 'creatures.csv' automatically"));
    assert!(output.contains("Select the file manually? [y/N] "));
    assert!(output.contains("Path to CSV file (empty to cancel): "));
    assert!(output.contains("1 records available."));
    assert!(output.contains("Name: Eevee"));
    Ok(())
}

#[tokio::test]
async fn test_end_of_input_waits_for_load() -> Result<()> {
    let output = run_script(&Settings::default(), "load\n").await?;
    assert!(output.contains("Data loaded successfully"));
    Ok(())
}

#[tokio::test]
async fn test_autoload_from_settings() -> Result<()> {
    let settings = Settings {
        autoload: true,
        ..Settings::default()
    };
    let output = run_script(&settings, "wait\nadd Mew\nquit\n").await?;

    assert!(output.contains("Loading data with HashMap..."));
    assert!(output.contains("'Mew' added to your collection."));
    Ok(())
}
