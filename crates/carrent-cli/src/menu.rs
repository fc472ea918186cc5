//! Interactive menus
//!
//! Main menu -> portal (client / staff / administrator) -> session menu.
//! Business-rule errors are printed and the menu carries on; only I/O
//! failures unwind. End of input leaves every menu and exits cleanly.

use std::io::{self, BufRead, Write};
use std::str::FromStr;

use tracing::debug;

use carrent_app::app::{fleet_rows, held_rows, renter_summaries, RentalDesk, RenterRef, Session};
use carrent_domain::Clock;
use carrent_store::{RenterField, VehicleField};
use carrent_types::{
    Error, OutputFormat, RentalError, RenterClass, RenterId, Result, Subject, VehicleId,
    VehicleSpec,
};

use crate::output;
use crate::prompt::Prompt;

/// Run the interactive desk until the user exits or input ends
pub fn run<C: Clock, R: BufRead, W: Write>(
    desk: &mut RentalDesk<C>,
    prompt: &mut Prompt<R, W>,
    format: OutputFormat,
) -> Result<()> {
    let mut menu = Menu {
        desk,
        prompt,
        format,
    };
    match menu.main_menu() {
        Err(Error::Io(e)) if e.kind() == io::ErrorKind::UnexpectedEof => {
            debug!("input closed");
            Ok(())
        }
        other => other,
    }
}

struct Menu<'a, C: Clock, R, W> {
    desk: &'a mut RentalDesk<C>,
    prompt: &'a mut Prompt<R, W>,
    format: OutputFormat,
}

impl<C: Clock, R: BufRead, W: Write> Menu<'_, C, R, W> {
    fn say(&mut self, text: impl std::fmt::Display) -> Result<()> {
        writeln!(self.prompt.out(), "{}", text)?;
        Ok(())
    }

    fn report(&mut self, err: RentalError) -> Result<()> {
        debug!(error = %err, "operation rejected");
        self.say(err)
    }

    /// Ask for a number; prints a message and returns None if it does not parse
    fn ask_number<T: FromStr>(&mut self, question: &str) -> Result<Option<T>> {
        let value = self.prompt.ask_parsed(question)?;
        if value.is_none() {
            self.say("Invalid number")?;
        }
        Ok(value)
    }

    fn main_menu(&mut self) -> Result<()> {
        loop {
            self.say("####################### Digital Vehicle Rental Management System #######################")?;
            self.say("1. Client Portal\n2. Staff Portal\n3. Administrator Portal\n0. Exit System")?;
            match self.prompt.ask_choice("Enter your selection: ")? {
                Some('1') => self.renter_portal(RenterClass::Client)?,
                Some('2') => self.renter_portal(RenterClass::Staff)?,
                Some('3') => self.admin_portal()?,
                Some('0') => return Ok(()),
                _ => self.say("Invalid selection")?,
            }
        }
    }

    // ------------------------------------------------------------------
    // Renter side
    // ------------------------------------------------------------------

    fn renter_portal(&mut self, class: RenterClass) -> Result<()> {
        loop {
            self.say(format!("{} Portal Options:", class))?;
            if class == RenterClass::Client {
                self.say("1. Login\n2. Register\n0. Back")?;
            } else {
                self.say("1. Login\n0. Back")?;
            }
            match self.prompt.ask_choice("Enter your choice: ")? {
                Some('1') => self.renter_login(class)?,
                Some('2') if class == RenterClass::Client => self.register()?,
                Some('0') => return Ok(()),
                _ => self.say("Invalid selection")?,
            }
        }
    }

    fn renter_login(&mut self, class: RenterClass) -> Result<()> {
        let name = self.prompt.ask("Enter your username:\n")?;
        let password = self.prompt.ask("Enter your password:\n")?;
        match self.desk.login(class, &name, &password) {
            Ok(mut session) => self.renter_session(&mut session),
            Err(e) => self.report(e),
        }
    }

    fn register(&mut self) -> Result<()> {
        let name = self.prompt.ask("Enter desired username:\n")?;
        let password = self.prompt.ask("Enter password:\n")?;
        let confirm = self.prompt.ask("Confirm password:\n")?;
        match self.desk.register(&name, &password, &confirm) {
            Ok(_) => self.say("Registration successful\nPlease login to access your account\n"),
            Err(e) => self.report(e),
        }
    }

    fn renter_session(&mut self, session: &mut Session) -> Result<()> {
        let Some(who) = session.renter() else {
            return Ok(());
        };
        let name = self.desk.renter(who)?.name.clone();
        self.say(format!("Welcome, {}", name))?;

        while session.is_logged_in() {
            self.say("Select an option:")?;
            self.say(
                "1. View all vehicles\n2. View your rentals\n3. Rent a vehicle\n\
                 4. Return a vehicle\n5. Check dues\n6. Pay dues\n0. Logout",
            )?;
            match self.prompt.ask_choice("Enter your choice: ")? {
                Some('1') => self.show_fleet()?,
                Some('2') => self.show_rentals(who)?,
                Some('3') => self.rent(who)?,
                Some('4') => self.return_vehicle(who)?,
                Some('5') => {
                    let balance = self.desk.renter(who)?.ledger().balance();
                    self.say(format!("Your current outstanding balance: {}\n", balance))?;
                }
                Some('6') => self.pay_dues(who)?,
                Some('0') => session.logout(),
                _ => self.say("Invalid selection")?,
            }
        }
        Ok(())
    }

    fn show_fleet(&mut self) -> Result<()> {
        let rows = fleet_rows(self.desk.registry(), self.desk.now());
        output::write_fleet(self.prompt.out(), &rows, self.format)
    }

    fn show_rentals(&mut self, who: RenterRef) -> Result<()> {
        let rows = held_rows(self.desk.renter(who)?, self.desk.now());
        output::write_held(self.prompt.out(), &rows, self.format)
    }

    fn rent(&mut self, who: RenterRef) -> Result<()> {
        let Some(vehicle_id) =
            self.ask_number::<VehicleId>("Enter the vehicle ID you wish to rent: ")?
        else {
            return Ok(());
        };
        match self.desk.rent(who, vehicle_id) {
            Ok(receipt) => output::write_rent_receipt(self.prompt.out(), &receipt),
            Err(e) => self.report(e),
        }
    }

    fn return_vehicle(&mut self, who: RenterRef) -> Result<()> {
        let Some(vehicle_id) =
            self.ask_number::<VehicleId>("Enter the vehicle ID you wish to return: ")?
        else {
            return Ok(());
        };
        match self.desk.return_vehicle(who, vehicle_id) {
            Ok(receipt) => output::write_return_receipt(self.prompt.out(), &receipt),
            Err(e) => self.report(e),
        }
    }

    fn pay_dues(&mut self, who: RenterRef) -> Result<()> {
        let balance = self.desk.renter(who)?.ledger().balance();
        if balance == 0 {
            return self.say("No outstanding dues to pay\n");
        }
        self.say(format!("Current outstanding balance: {}", balance))?;
        let Some(amount) = self.ask_number::<i64>("Enter payment amount: ")? else {
            return Ok(());
        };
        match self.desk.pay_dues(who, amount) {
            Ok(remaining) => self.say(format!(
                "Payment processed successfully\nRemaining balance: {}\n",
                remaining
            )),
            Err(e) => self.report(e),
        }
    }

    // ------------------------------------------------------------------
    // Administrator side
    // ------------------------------------------------------------------

    fn admin_portal(&mut self) -> Result<()> {
        loop {
            self.say("Administrator Portal Options:\n1. Login\n0. Back")?;
            match self.prompt.ask_choice("Enter your choice: ")? {
                Some('1') => {
                    let name = self.prompt.ask("Enter username:\n")?;
                    let password = self.prompt.ask("Enter password:\n")?;
                    match self.desk.login_admin(&name, &password) {
                        Ok(mut session) => {
                            self.say("Authentication successful")?;
                            self.admin_session(&mut session)?;
                        }
                        Err(e) => self.report(e)?,
                    }
                }
                Some('0') => return Ok(()),
                _ => self.say("Invalid selection")?,
            }
        }
    }

    fn admin_session(&mut self, session: &mut Session) -> Result<()> {
        let name = self.desk.admin_name().to_string();
        self.say(format!("Welcome, {}", name))?;

        while session.is_admin() {
            self.say("Administrator Panel Options:")?;
            self.say(
                "1. View all vehicles\n2. Add vehicle\n3. Modify vehicle\n4. Remove vehicle\n\
                 5. View all clients\n6. Add client\n7. Modify client\n8. Remove client\n\
                 9. View all staff\na. Add staff\nb. Modify staff\nc. Remove staff\n0. Logout",
            )?;
            match self.prompt.ask_choice("Enter your choice: ")? {
                Some('1') => self.show_fleet()?,
                Some('2') => self.add_vehicle()?,
                Some('3') => self.modify_vehicle()?,
                Some('4') => self.remove_vehicle()?,
                Some('5') => self.show_renters(RenterClass::Client)?,
                Some('6') => self.add_renter(RenterClass::Client)?,
                Some('7') => self.modify_renter(RenterClass::Client)?,
                Some('8') => self.remove_renter(RenterClass::Client)?,
                Some('9') => self.show_renters(RenterClass::Staff)?,
                Some('a') => self.add_renter(RenterClass::Staff)?,
                Some('b') => self.modify_renter(RenterClass::Staff)?,
                Some('c') => self.remove_renter(RenterClass::Staff)?,
                Some('0') => session.logout(),
                _ => self.say("Invalid selection")?,
            }
        }
        Ok(())
    }

    fn add_vehicle(&mut self) -> Result<()> {
        let brand = self.prompt.ask("Enter vehicle brand: ")?;
        let model = self.prompt.ask("Enter vehicle model: ")?;
        let Some(rent) = self.ask_number::<i64>("Enter daily rent: ")? else {
            return Ok(());
        };
        let Some(price) = self.ask_number::<i64>("Enter market price: ")? else {
            return Ok(());
        };
        let Some(seats) = self.ask_number::<u32>("Enter seating capacity: ")? else {
            return Ok(());
        };
        let color = self.prompt.ask("Enter vehicle color: ")?;

        match self
            .desk
            .add_vehicle(VehicleSpec::new(brand, model, rent, price, seats, color))
        {
            Ok(vehicle) => self.say(format!("Vehicle {} added successfully", vehicle.id)),
            Err(e) => self.report(e),
        }
    }

    fn modify_vehicle(&mut self) -> Result<()> {
        let Some(vehicle_id) = self.ask_number::<VehicleId>("Enter vehicle ID to modify: ")? else {
            return Ok(());
        };

        loop {
            let Some(vehicle) = self.desk.registry().find(vehicle_id).cloned() else {
                return self.report(RentalError::NotFound(Subject::Vehicle(vehicle_id)));
            };

            self.say("Select field to update:")?;
            self.say("1. Brand\n2. Model\n3. Rent\n4. Price\n5. Seats\n6. Color\n7. Condition\n0. Finish")?;
            let field = match self.prompt.ask_choice("Enter choice: ")? {
                Some('1') => {
                    self.say(format!("Current brand: {}", vehicle.brand))?;
                    VehicleField::Brand(self.prompt.ask("Enter new brand: ")?)
                }
                Some('2') => {
                    self.say(format!("Current model: {}", vehicle.model))?;
                    VehicleField::Model(self.prompt.ask("Enter new model: ")?)
                }
                Some('3') => {
                    self.say(format!("Current rent: {}", vehicle.daily_rate))?;
                    match self.ask_number("Enter new rent: ")? {
                        Some(rate) => VehicleField::DailyRate(rate),
                        None => continue,
                    }
                }
                Some('4') => {
                    self.say(format!("Current price: {}", vehicle.market_price))?;
                    match self.ask_number("Enter new price: ")? {
                        Some(price) => VehicleField::MarketPrice(price),
                        None => continue,
                    }
                }
                Some('5') => {
                    self.say(format!("Current seats: {}", vehicle.seats))?;
                    match self.ask_number("Enter new seats: ")? {
                        Some(seats) => VehicleField::Seats(seats),
                        None => continue,
                    }
                }
                Some('6') => {
                    self.say(format!("Current color: {}", vehicle.color))?;
                    VehicleField::Color(self.prompt.ask("Enter new color: ")?)
                }
                Some('7') => {
                    self.say(format!("Current condition: {}", vehicle.condition))?;
                    match self.ask_number("Enter new condition: ")? {
                        Some(condition) => VehicleField::Condition(condition),
                        None => continue,
                    }
                }
                Some('0') => return Ok(()),
                _ => {
                    self.say("Invalid choice")?;
                    continue;
                }
            };

            match self.desk.update_vehicle(vehicle_id, field) {
                Ok(_) => self.say("Vehicle updated")?,
                Err(e) => self.report(e)?,
            }
        }
    }

    fn remove_vehicle(&mut self) -> Result<()> {
        let Some(vehicle_id) = self.ask_number::<VehicleId>("Enter vehicle ID to remove: ")? else {
            return Ok(());
        };
        match self.desk.remove_vehicle(vehicle_id) {
            Ok(_) => self.say("Vehicle removed successfully"),
            Err(e) => self.report(e),
        }
    }

    fn show_renters(&mut self, class: RenterClass) -> Result<()> {
        let summaries = renter_summaries(self.desk.directory(), class);
        output::write_renters(self.prompt.out(), &summaries, self.format)
    }

    fn add_renter(&mut self, class: RenterClass) -> Result<()> {
        let label = class.label().to_lowercase();
        let name = self.prompt.ask(&format!("Enter {} name: ", label))?;
        let password = self.prompt.ask(&format!("Enter {} password: ", label))?;
        match self.desk.add_renter(class, &name, &password) {
            Ok(who) => self.say(format!("{} {} added successfully", class, who.id)),
            Err(e) => self.report(e),
        }
    }

    fn ask_renter(&mut self, class: RenterClass, action: &str) -> Result<Option<RenterRef>> {
        let question = format!("Enter {} ID to {}: ", class.label().to_lowercase(), action);
        Ok(self
            .ask_number::<RenterId>(&question)?
            .map(|id| RenterRef::new(class, id)))
    }

    fn modify_renter(&mut self, class: RenterClass) -> Result<()> {
        let Some(who) = self.ask_renter(class, "modify")? else {
            return Ok(());
        };

        loop {
            let (name, dues, reputation) = match self.desk.renter(who) {
                Ok(renter) => (
                    renter.name.clone(),
                    renter.ledger().balance(),
                    renter.ledger().reputation(),
                ),
                Err(e) => return self.report(e),
            };

            self.say("Select field to update:")?;
            self.say("1. Name\n2. Password\n3. Dues\n4. Rating\n0. Finish")?;
            let field = match self.prompt.ask_choice("Enter choice: ")? {
                Some('1') => {
                    self.say(format!("Current name: {}", name))?;
                    RenterField::Name(self.prompt.ask("Enter new name: ")?)
                }
                Some('2') => RenterField::Password(self.prompt.ask("Enter new password: ")?),
                Some('3') => {
                    self.say(format!("Current dues: {}", dues))?;
                    match self.ask_number("Enter new dues: ")? {
                        Some(dues) => RenterField::Dues(dues),
                        None => continue,
                    }
                }
                Some('4') => {
                    self.say(format!("Current rating: {}", reputation))?;
                    match self.ask_number("Enter new rating: ")? {
                        Some(value) => RenterField::Reputation(value),
                        None => continue,
                    }
                }
                Some('0') => return Ok(()),
                _ => {
                    self.say("Invalid choice")?;
                    continue;
                }
            };

            match self.desk.update_renter(who, field) {
                Ok(()) => self.say(format!("{} updated", class))?,
                Err(e) => self.report(e)?,
            }
        }
    }

    fn remove_renter(&mut self, class: RenterClass) -> Result<()> {
        let Some(who) = self.ask_renter(class, "remove")? else {
            return Ok(());
        };
        match self.desk.remove_renter(who) {
            Ok(removed) => self.say(format!("{} {} removed successfully", class, removed.name)),
            Err(e) => self.report(e),
        }
    }
}
