//! Driver alerts and the per-driver report

use std::sync::Arc;

use chrono::{DateTime, FixedOffset, Utc};
use serde::Serialize;

use crate::domain::{Alert, AlertChart, Driver};
use crate::error::DomainError;
use crate::repositories::AlertRepository;
use crate::services::DriverService;

/// Everything the driver report page shows.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DriverReport {
    pub driver: Driver,
    pub alerts: Vec<Alert>,
    pub chart: AlertChart,
}

pub struct AlertService {
    alert_repo: Arc<dyn AlertRepository>,
    drivers: Arc<DriverService>,
    display_offset: FixedOffset,
}

impl AlertService {
    /// `display_offset` decides which calendar day a chart alert falls on.
    pub fn new(
        alert_repo: Arc<dyn AlertRepository>,
        drivers: Arc<DriverService>,
        display_offset: FixedOffset,
    ) -> Self {
        Self {
            alert_repo,
            drivers,
            display_offset,
        }
    }

    /// Alerts of an existing driver, newest first.
    pub async fn driver_alerts(&self, driver_id: i32) -> Result<Vec<Alert>, DomainError> {
        self.drivers.find_driver(driver_id).await?;
        self.load_sorted(driver_id).await
    }

    pub async fn driver_report(
        &self,
        driver_id: i32,
        now: DateTime<Utc>,
    ) -> Result<DriverReport, DomainError> {
        let driver = self.drivers.find_driver(driver_id).await?;
        let alerts = self.load_sorted(driver_id).await?;
        let chart = AlertChart::from_alerts(&alerts, now, self.display_offset);
        Ok(DriverReport {
            driver,
            alerts,
            chart,
        })
    }

    async fn load_sorted(&self, driver_id: i32) -> Result<Vec<Alert>, DomainError> {
        let mut alerts = self.alert_repo.find_by_driver(driver_id).await?;
        Alert::sort_newest_first(&mut alerts);
        Ok(alerts)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repositories::{MockAlertRepository, MockDriverRepository};
    use chrono::{Duration, TimeZone};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 5, 20, 12, 0, 0).unwrap()
    }

    fn driver() -> Driver {
        Driver {
            conductor_id: 4,
            first_name: "Andrés".into(),
            last_name: "Rojas".into(),
            age: 29,
            bus_asignado: "B-400".into(),
            placa: "XYZ987".into(),
            estado: "En Ruta".into(),
            estilo_conduccion: "Agresivo".into(),
            imagen_url: Some("img/andres.jpg".into()),
        }
    }

    fn alert(id: i32, tipo: &str, days_ago: i64) -> Alert {
        Alert {
            alerta_id: id,
            conductor_id: 4,
            tipo: tipo.into(),
            descripcion: "Frenado brusco".into(),
            fecha: now() - Duration::days(days_ago),
        }
    }

    fn drivers_with(found: bool) -> Arc<DriverService> {
        let mut repo = MockDriverRepository::new();
        repo.expect_find_by_id()
            .returning(move |_| Ok(found.then(driver)));
        Arc::new(DriverService::new(Arc::new(repo)))
    }

    fn service(alerts: MockAlertRepository, driver_found: bool) -> AlertService {
        AlertService::new(
            Arc::new(alerts),
            drivers_with(driver_found),
            FixedOffset::east_opt(0).unwrap(),
        )
    }

    #[tokio::test]
    async fn alerts_are_returned_newest_first() {
        let mut alerts = MockAlertRepository::new();
        alerts.expect_find_by_driver().withf(|id| *id == 4).returning(|_| {
            Ok(vec![
                alert(1, "Proximidad", 5),
                alert(2, "Maniobra Peligrosa", 1),
            ])
        });

        let result = service(alerts, true)
            .driver_alerts(4)
            .await
            .unwrap();
        let ids: Vec<i32> = result.iter().map(|a| a.alerta_id).collect();
        assert_eq!(ids, vec![2, 1]);
    }

    #[tokio::test]
    async fn alerts_of_unknown_driver_is_not_found() {
        let mut alerts = MockAlertRepository::new();
        alerts.expect_find_by_driver().never();

        let err = service(alerts, false)
            .driver_alerts(77)
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::DriverNotFound(77)));
    }

    #[tokio::test]
    async fn report_combines_driver_alerts_and_chart() {
        let mut alerts = MockAlertRepository::new();
        alerts.expect_find_by_driver().returning(|_| {
            Ok(vec![
                alert(1, "Maniobra Peligrosa", 2),
                alert(2, "Proximidad", 2),
                alert(3, "Proximidad", 60),
            ])
        });

        let report = service(alerts, true)
            .driver_report(4, now())
            .await
            .unwrap();

        assert_eq!(report.driver.conductor_id, 4);
        assert_eq!(report.alerts.len(), 3);
        assert_eq!(report.chart.labels, vec!["18/5/2025"]);
        assert_eq!(report.chart.maniobras, vec![1]);
        assert_eq!(report.chart.proximidad, vec![1]);
    }

    #[tokio::test]
    async fn report_without_alerts_has_empty_chart() {
        let mut alerts = MockAlertRepository::new();
        alerts.expect_find_by_driver().returning(|_| Ok(vec![]));

        let report = service(alerts, true)
            .driver_report(4, now())
            .await
            .unwrap();
        assert!(report.alerts.is_empty());
        assert_eq!(report.chart, AlertChart::default());
    }
}
