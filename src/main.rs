use std::sync::Arc;

use anyhow::{Context, Result};
use tokio::sync::mpsc;
use tokio::time::sleep;

use elevatorsim::building::Building;
use elevatorsim::{config, init, print, workload};


#[tokio::main]
async fn main() -> Result<()> {
    let settings = init::parse_args()?;

    print::info(format!(
        "Starter simulering: {} etasjar, {} heisar",
        settings.building.num_floors, settings.building.num_elevators
    ));

    /* START ----------- Rapportering av hendingar ---------------------- */
    let (event_tx, event_rx) = mpsc::unbounded_channel();
    {
        let _reporter_task = tokio::spawn(async move {
            print::report_events(event_rx).await;
        });
    }
    /* SLUTT ----------- Rapportering av hendingar ---------------------- */

    let building = Arc::new(
        Building::new(settings.building, settings.timing, Some(event_tx))
            .await
            .context("failed to set up the building")?,
    );

    // Task som printer status
    {
        let building = building.clone();
        let _status_task = tokio::spawn(async move {
            let num_floors = building.config().num_floors;
            loop {
                sleep(config::STATUS_PRINT_PERIOD).await;
                print::status_table(&building.views().await, num_floors);
            }
        });
    }

    /* START ----------- Tilfeldige knappetrykk ---------------------- */
    if settings.run_workload {
        {
            let building = building.clone();
            let _cabin_task = tokio::spawn(async move {
                workload::random_cabin_calls(building, settings.workload).await;
            });
        }
        {
            let building = building.clone();
            let _floor_task = tokio::spawn(async move {
                workload::random_floor_calls(building, settings.workload).await;
            });
        }
    } else {
        print::warn("Workload disabled, the elevators will stay idle".to_string());
    }
    /* SLUTT ----------- Tilfeldige knappetrykk ---------------------- */

    //Vent med å avslutte programmet
    futures::future::pending::<()>().await;
    Ok(())
}
