quantity!(
    /// Swedish krona per kilowatt-hour, before VAT and other taxes.
    KilowattHourRate, format: "{:.2} kr/kWh"
);
